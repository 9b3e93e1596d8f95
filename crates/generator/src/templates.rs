//! Template loading and the Markdown report sink

use crate::PlanSink;
use resource_planner_common::{PlanError, ResourcePlan, Result};
use std::collections::HashMap;
use std::io::Write;
use tera::{Context, Tera, Value};

const REPORT_TEMPLATE: &str = "plan.md";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("code_list", code_list_filter);
    tera.register_filter("status_path", status_path_filter);

    tera.add_raw_template(REPORT_TEMPLATE, include_str!("../templates/plan.md.tera"))
        .map_err(|e| PlanError::Emit(format!("Failed to load plan.md template: {}", e)))?;

    Ok(tera)
}

/// Renders a human-readable report of the plan
pub struct MarkdownSink<W: Write> {
    writer: W,
    tera: Tera,
}

impl<W: Write> MarkdownSink<W> {
    pub fn new(writer: W) -> Result<Self> {
        Ok(Self {
            writer,
            tera: load_templates()?,
        })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PlanSink for MarkdownSink<W> {
    fn accept(&mut self, plan: &ResourcePlan) -> Result<()> {
        let mut context = Context::new();
        context.insert("service", &plan.service);
        context.insert("resources", &plan.resources);
        context.insert("summary", &plan.summary);

        let rendered = self
            .tera
            .render(REPORT_TEMPLATE, &context)
            .map_err(|e| PlanError::Emit(format!("Template error: {:?}", e)))?;

        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Filter rendering a string list as inline code, or `-` when empty
fn code_list_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let items = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("code_list filter expects an array"))?;

    if items.is_empty() {
        return Ok(Value::String("-".to_string()));
    }

    let rendered = items
        .iter()
        .map(|item| match item.as_str() {
            Some(s) => format!("`{}`", s),
            None => format!("`{}`", item),
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Value::String(rendered))
}

/// Filter rendering a status chain as `member (Shape) -> member (Shape)`
fn status_path_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let entries = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("status_path filter expects an array"))?;

    let mut hops = Vec::with_capacity(entries.len());
    for entry in entries {
        let status = entry.get("status").and_then(Value::as_str);
        let shape = entry.get("status_shape").and_then(Value::as_str);
        match (status, shape) {
            (Some(status), Some(shape)) => hops.push(format!("`{}` ({})", status, shape)),
            _ => {
                return Err(tera::Error::msg(
                    "status_path filter expects status and status_shape fields",
                ))
            }
        }
    }

    Ok(Value::String(hops.join(" -> ")))
}
