//! Subcommand implementations
//!
//! Each command writes to the supplied writer and reports whether it
//! succeeded, so the binary can map the outcome to an exit code.

use super::cli::{Command, RunArgs};
use super::display;
use super::error::{AppError, AppResult};
use crate::handler::OutputType;
use crate::orchestrator::{BatchResults, ExportOrchestrator};
use std::io::Write;

pub fn execute(
    command: &Command,
    orchestrator: &mut ExportOrchestrator,
    out: &mut dyn Write,
    use_color: bool,
) -> AppResult<bool> {
    match command {
        Command::List {
            category,
            output_type,
            json,
        } => list(orchestrator, category.as_deref(), *output_type, *json, out),
        Command::Run(run_args) => run(orchestrator, run_args, out, use_color),
        Command::Status { json } => status(orchestrator, *json, out, use_color),
        Command::Validate { name } => validate(orchestrator, name.as_deref(), out, use_color),
        Command::Schema { name, json } => schema(orchestrator, name, *json, out),
    }
}

fn list(
    orchestrator: &ExportOrchestrator,
    category: Option<&str>,
    output_type: Option<OutputType>,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<bool> {
    let discovery = orchestrator.factory().discovery();
    let mut entries = match category {
        Some(category) => discovery.find_by_category(category)?,
        None => discovery.discover(false)?.to_vec(),
    };
    if let Some(output_type) = output_type {
        entries.retain(|e| e.metadata.output_type == output_type);
    }

    if json {
        let metadata: Vec<_> = entries.iter().map(|e| &e.metadata).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
    } else {
        write!(out, "{}", display::render_catalog(&entries))?;
    }
    Ok(true)
}

fn run(
    orchestrator: &mut ExportOrchestrator,
    run_args: &RunArgs,
    out: &mut dyn Write,
    use_color: bool,
) -> AppResult<bool> {
    orchestrator.set_configs(&run_args.overrides());

    let batch: BatchResults = if run_args.all {
        orchestrator.generate_all_outputs(&run_args.exclude_category, run_args.stop_on_error)?
    } else {
        orchestrator.generate_outputs(&run_args.names, run_args.stop_on_error)?
    };

    if run_args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&batch)?)?;
    } else {
        write!(out, "{}", display::render_results(&batch, use_color))?;
    }
    Ok(batch.all_succeeded())
}

fn status(
    orchestrator: &ExportOrchestrator,
    json: bool,
    out: &mut dyn Write,
    use_color: bool,
) -> AppResult<bool> {
    let statuses = orchestrator.handler_statuses()?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&statuses)?)?;
    } else {
        write!(out, "{}", display::render_statuses(&statuses, use_color))?;
    }
    // A handler that cannot be built is a failure; one that is merely
    // unconfigured is not
    Ok(statuses.iter().all(|s| s.error.is_none()))
}

fn validate(
    orchestrator: &ExportOrchestrator,
    name: Option<&str>,
    out: &mut dyn Write,
    use_color: bool,
) -> AppResult<bool> {
    let reports = match name {
        Some(name) => vec![(name.to_string(), orchestrator.validate_handler_config(name))],
        None => {
            let reports = orchestrator.validate_all_enabled_configs();
            if reports.is_empty() {
                return Err(AppError::Argument(
                    "no handler named and no enabled_outputs configured".to_string(),
                ));
            }
            reports.into_iter().collect()
        }
    };

    for (name, report) in &reports {
        write!(out, "{}", display::render_validation(name, report, use_color))?;
    }
    Ok(reports.iter().all(|(_, report)| report.valid))
}

fn schema(
    orchestrator: &ExportOrchestrator,
    name: &str,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<bool> {
    let schema = orchestrator.factory().handler_config_schema(name)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    } else {
        write!(out, "{}", display::render_schema(name, &schema))?;
    }
    Ok(true)
}
