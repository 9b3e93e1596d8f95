//! Plan emitters for Resource Planner
//!
//! This crate hands a finished [`ResourcePlan`] to a sink: the tabular CSV
//! record file consumed by downstream tooling, serde-backed JSON and YAML
//! dumps, or a Markdown report for humans.

mod csv;
mod templates;

pub use csv::{CsvSink, PLAN_COLUMNS};
pub use templates::MarkdownSink;

use resource_planner_common::{PlanError, ResourcePlan, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Destination for a finished resource plan
#[cfg_attr(test, mockall::automock)]
pub trait PlanSink {
    /// Consume the plan; records arrive in resource-name order
    fn accept(&mut self, plan: &ResourcePlan) -> Result<()>;
}

/// Hand `plan` to `sink`
pub fn emit_plan(plan: &ResourcePlan, sink: &mut dyn PlanSink) -> Result<()> {
    debug!(resources = plan.resources.len(), "emitting plan");
    sink.accept(plan)
}

/// Supported plan output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFormat {
    #[default]
    Csv,
    Json,
    Yaml,
    Markdown,
}

impl PlanFormat {
    /// Infer the format from a file extension, falling back to CSV
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PlanFormat::Csv => "csv",
            PlanFormat::Json => "json",
            PlanFormat::Yaml => "yaml",
            PlanFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanFormat::Csv => write!(f, "CSV"),
            PlanFormat::Json => write!(f, "JSON"),
            PlanFormat::Yaml => write!(f, "YAML"),
            PlanFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

impl FromStr for PlanFormat {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(PlanFormat::Csv),
            "json" => Ok(PlanFormat::Json),
            "yaml" | "yml" => Ok(PlanFormat::Yaml),
            "md" | "markdown" => Ok(PlanFormat::Markdown),
            other => Err(PlanError::Config(format!(
                "Unknown plan format '{}' (expected csv, json, yaml or markdown)",
                other
            ))),
        }
    }
}

/// Writes the record list as pretty-printed JSON
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlanSink for JsonSink<W> {
    fn accept(&mut self, plan: &ResourcePlan) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &plan.resources)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the record list as a YAML sequence
pub struct YamlSink<W: Write> {
    writer: W,
}

impl<W: Write> YamlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlanSink for YamlSink<W> {
    fn accept(&mut self, plan: &ResourcePlan) -> Result<()> {
        serde_yaml::to_writer(&mut self.writer, &plan.resources)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Build the sink for `format` around `writer`
pub fn sink_for<'w, W: Write + 'w>(
    format: PlanFormat,
    writer: W,
) -> Result<Box<dyn PlanSink + 'w>> {
    let sink: Box<dyn PlanSink + 'w> = match format {
        PlanFormat::Csv => Box::new(CsvSink::new(writer)),
        PlanFormat::Json => Box::new(JsonSink::new(writer)),
        PlanFormat::Yaml => Box::new(YamlSink::new(writer)),
        PlanFormat::Markdown => Box::new(MarkdownSink::new(writer)?),
    };
    Ok(sink)
}

/// Persist `plan` to `path`, creating parent directories as needed
pub fn write_plan_to_file(plan: &ResourcePlan, path: &Path, format: PlanFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                PlanError::Emit(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        PlanError::Emit(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut sink = sink_for(format, BufWriter::new(file))?;
    emit_plan(plan, sink.as_mut())?;

    info!(
        path = %path.display(),
        format = %format,
        resources = plan.resources.len(),
        "wrote resource plan"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_planner_common::{ResourceRecord, StatusChainEntry};

    fn sample_plan() -> ResourcePlan {
        let mut endpoint = ResourceRecord::new("Endpoint");
        endpoint.class_methods = vec!["create".into(), "get".into()];
        endpoint.object_methods = vec!["refresh".into(), "wait_for_status".into()];
        endpoint.raw_actions = vec!["CreateEndpoint".into(), "DescribeEndpoint".into()];
        endpoint.resource_status_chain =
            vec![StatusChainEntry::new("EndpointStatus", "EndpointStatus")];
        endpoint.resource_states = vec!["Creating".into(), "InService".into()];

        ResourcePlan {
            service: Some("sagemaker".into()),
            resources: vec![endpoint],
            summary: Default::default(),
        }
    }

    #[test]
    fn test_emit_plan_hands_plan_to_sink() {
        let plan = sample_plan();
        let mut sink = MockPlanSink::new();
        sink.expect_accept()
            .withf(|p| p.resources.len() == 1 && p.resources[0].resource_name == "Endpoint")
            .times(1)
            .returning(|_| Ok(()));

        emit_plan(&plan, &mut sink).unwrap();
    }

    #[test]
    fn test_emit_plan_propagates_sink_error() {
        let plan = sample_plan();
        let mut sink = MockPlanSink::new();
        sink.expect_accept()
            .times(1)
            .returning(|_| Err(PlanError::Emit("disk full".into())));

        let err = emit_plan(&plan, &mut sink).unwrap_err();
        assert!(matches!(err, PlanError::Emit(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(PlanFormat::from_path(Path::new("plan.csv")), PlanFormat::Csv);
        assert_eq!(PlanFormat::from_path(Path::new("plan.JSON")), PlanFormat::Json);
        assert_eq!(PlanFormat::from_path(Path::new("out/plan.yml")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("plan.md")), PlanFormat::Markdown);
        assert_eq!(PlanFormat::from_path(Path::new("plan")), PlanFormat::Csv);
        assert_eq!(PlanFormat::from_path(Path::new("plan.txt")), PlanFormat::Csv);
    }

    #[test]
    fn test_format_parse_rejects_unknown() {
        assert!(matches!(
            "toml".parse::<PlanFormat>(),
            Err(PlanError::Config(_))
        ));
        assert_eq!("Markdown".parse::<PlanFormat>().unwrap(), PlanFormat::Markdown);
    }

    #[test]
    fn test_json_sink_writes_records() {
        let mut sink = JsonSink::new(Vec::new());
        sink.accept(&sample_plan()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(value[0]["resource_name"], "Endpoint");
        assert_eq!(value[0]["type"], "resource");
        assert_eq!(
            value[0]["resource_status_chain"][0]["status_shape"],
            "EndpointStatus"
        );
    }

    #[test]
    fn test_yaml_sink_round_trips_records() {
        let plan = sample_plan();
        let mut sink = YamlSink::new(Vec::new());
        sink.accept(&plan).unwrap();

        let records: Vec<ResourceRecord> = serde_yaml::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(records, plan.resources);
    }
}
