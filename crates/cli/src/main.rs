//! Resource Planner CLI
//!
//! Command-line interface for deriving resource plans from botocore-style
//! service models.

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use resource_planner_analyzer::ResourcePlanner;
use resource_planner_common::{PlanOverrides, ResourcePlan};
use resource_planner_generator::{write_plan_to_file, PlanFormat};
use resource_planner_parser::{load_service_model, ServiceModel};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_OUTPUT_STEM: &str = "resource_plan";

#[derive(Parser)]
#[command(name = "resource-planner")]
#[command(version, about = "Infer resource plans from API operation catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive a resource plan and write it to a file
    #[command(after_help = "EXAMPLES:\n  \
        # Write the CSV plan for SageMaker\n  \
        resource-planner plan --spec sagemaker/2017-07-24/service-2.json\n\n  \
        # Markdown report with extra overrides\n  \
        resource-planner plan \\\n    \
        --spec service-2.json \\\n    \
        --overrides overrides.yaml \\\n    \
        --output plans/sagemaker.md\n\n  \
        # JSON plan (written to resource_plan.json) without the built-in overrides\n  \
        resource-planner plan --spec service-2.json --no-builtin-overrides --format json")]
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to resource_plan.<format extension>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension if not specified)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Derive a resource plan and print a summary
    #[command(after_help = "EXAMPLES:\n  \
        # Resource counts and unassigned operations\n  \
        resource-planner inspect --spec service-2.json\n\n  \
        # Per-resource method summary\n  \
        resource-planner inspect --spec service-2.json --verbose")]
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Path to the service model (service-2.json)
    #[arg(short, long)]
    spec: PathBuf,

    /// YAML file with additional manual overrides
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Do not apply the built-in override table
    #[arg(long)]
    no_builtin_overrides: bool,

    /// Service name (read from the model metadata if not specified)
    #[arg(long)]
    service: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One row per resource, list cells as JSON arrays
    Csv,
    /// Record list as JSON
    Json,
    /// Record list as YAML
    Yaml,
    /// Human-readable report
    Markdown,
}

impl From<OutputFormat> for PlanFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => PlanFormat::Csv,
            OutputFormat::Json => PlanFormat::Json,
            OutputFormat::Yaml => PlanFormat::Yaml,
            OutputFormat::Markdown => PlanFormat::Markdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Plan {
            input,
            output,
            format,
        } => {
            let (output, format) = resolve_output(output, format.map(PlanFormat::from));
            plan_command(&input, &output, format, cli.verbose)?;
        }
        Commands::Inspect { input } => {
            inspect_command(&input, cli.verbose)?;
        }
    }

    Ok(())
}

fn plan_command(
    input: &InputArgs,
    output: &Path,
    format: PlanFormat,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Planning resources from: {}",
        "→".cyan(),
        input.spec.display()
    );

    if verbose {
        println!("  Output: {}", output.display());
        println!("  Format: {}", format);
    }

    let plan = build_plan(input)?;
    println!(
        "{} Derived {} resources from {} operations",
        "✓".green(),
        plan.summary.total_resources,
        plan.summary.total_operations
    );

    println!("{} Writing {} plan...", "→".cyan(), format);
    write_plan_to_file(&plan, output, format)
        .with_context(|| format!("Failed to write plan to {}", output.display()))?;

    println!("\n{}", "✓ Plan complete!".green().bold());
    println!("  📄 {}", output.display());

    let unassigned = plan.summary.unassigned_operations.len();
    if unassigned > 0 {
        println!(
            "  {} {} operations matched no resource (run {} to list them)",
            "!".yellow(),
            unassigned,
            "inspect".cyan()
        );
    }

    Ok(())
}

fn inspect_command(input: &InputArgs, verbose: bool) -> Result<()> {
    println!("{} Inspecting: {}", "→".cyan(), input.spec.display());

    let plan = build_plan(input)?;
    let summary = &plan.summary;

    println!("\n{}", "Resource Plan:".bold());
    if let Some(service) = &plan.service {
        println!("  Service: {}", service.yellow());
    }
    println!("  Operations: {}", summary.total_operations);
    println!("  Resources: {}", summary.total_resources);
    println!("  Assigned operations: {}", summary.assigned_operations);
    println!(
        "  Unassigned operations: {}",
        summary.unassigned_operations.len()
    );

    if verbose {
        println!("\n{}", "Resources:".bold());
        for resource in &plan.resources {
            println!(
                "  • {} ({} actions)",
                resource.resource_name.cyan(),
                resource.raw_actions.len()
            );
            println!("    Class: {}", join_or_dash(&resource.class_methods));
            println!("    Object: {}", join_or_dash(&resource.object_methods));
            if !resource.chain_resource_name.is_empty() {
                println!("    Chain: {}", resource.chain_resource_name.join(", "));
            }
            if !resource.additional_methods.is_empty() {
                println!(
                    "    Additional: {}",
                    resource.additional_methods.join(", ")
                );
            }
            if !resource.resource_states.is_empty() {
                println!("    States: {}", resource.resource_states.join(", "));
            }
        }
    }

    if !summary.unassigned_operations.is_empty() {
        println!("\n{}", "Unassigned operations:".bold());
        for operation in &summary.unassigned_operations {
            println!("  • {}", operation.dimmed());
        }
    }

    Ok(())
}

fn build_plan(input: &InputArgs) -> Result<ResourcePlan> {
    let model = load_service_model(&input.spec)
        .with_context(|| format!("Failed to load service model {}", input.spec.display()))?;
    debug!(
        operations = model.operations.len(),
        shapes = model.shapes.len(),
        "loaded service model"
    );

    let overrides = load_overrides(input.overrides.as_deref(), input.no_builtin_overrides)?;
    let mut planner = ResourcePlanner::new(&model).with_overrides(overrides);
    if let Some(service) = resolve_service_name(input, &model) {
        planner = planner.with_service(service);
    }

    planner.plan().context("Failed to build resource plan")
}

/// Pair the output path with a format
///
/// An explicit format wins; otherwise it comes from the path's extension. A
/// missing path becomes `resource_plan.<extension>`.
fn resolve_output(output: Option<PathBuf>, format: Option<PlanFormat>) -> (PathBuf, PlanFormat) {
    match (output, format) {
        (Some(output), Some(format)) => (output, format),
        (Some(output), None) => {
            let format = PlanFormat::from_path(&output);
            (output, format)
        }
        (None, format) => {
            let format = format.unwrap_or_default();
            (default_output(format), format)
        }
    }
}

fn default_output(format: PlanFormat) -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(format.extension())
}

fn load_overrides(path: Option<&Path>, no_builtin: bool) -> Result<PlanOverrides> {
    let base = if no_builtin {
        PlanOverrides::none()
    } else {
        PlanOverrides::builtin()
    };

    match path {
        Some(path) => {
            let extra = PlanOverrides::load(path)
                .with_context(|| format!("Failed to load overrides {}", path.display()))?;
            Ok(base.merge(extra))
        }
        None => Ok(base),
    }
}

/// Explicit flag, then model metadata, then the file layout
fn resolve_service_name(input: &InputArgs, model: &ServiceModel) -> Option<String> {
    input
        .service
        .clone()
        .or_else(|| model.service_name())
        .or_else(|| infer_service_name(&input.spec))
}

/// Infer the service name from a botocore data path
///
/// `<service>/<api-version>/service-2.json` yields `<service>`; any other file
/// yields its stem.
fn infer_service_name(path: &Path) -> Option<String> {
    let stem = path.file_stem().and_then(|s| s.to_str())?;

    if stem.starts_with("service-") {
        return path
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }

    Some(stem.to_string())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
