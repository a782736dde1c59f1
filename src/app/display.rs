//! Terminal rendering of catalog, status, results and schema tables

use crate::discovery::DiscoveredHandler;
use crate::factory::HandlerStatus;
use crate::handler::{ConfigSchema, ValidationReport};
use crate::orchestrator::{BatchResults, ResultsSummary};
use colored::Colorize;
use prettytable::{format, row, Table};

fn table_with_titles(titles: prettytable::Row) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(titles);
    table
}

fn paint(text: &str, ok: bool, use_color: bool) -> String {
    match (use_color, ok) {
        (false, _) => text.to_string(),
        (true, true) => text.green().to_string(),
        (true, false) => text.red().to_string(),
    }
}

pub fn render_catalog(entries: &[DiscoveredHandler]) -> String {
    if entries.is_empty() {
        return "No output handlers discovered.\n".to_string();
    }
    let mut table = table_with_titles(row!["Name", "Title", "Category", "Output", "Priority", "Version"]);
    for entry in entries {
        let metadata = &entry.metadata;
        table.add_row(row![
            metadata.name,
            metadata.title,
            metadata.category,
            metadata.output_type,
            metadata.priority,
            metadata.version
        ]);
    }
    table.to_string()
}

pub fn render_statuses(statuses: &[HandlerStatus], use_color: bool) -> String {
    let mut table = table_with_titles(row!["Name", "Category", "Status"]);
    for status in statuses {
        let text = match &status.error {
            Some(error) => paint(&format!("Error: {}", error), false, use_color),
            None => paint(&status.status, status.configured, use_color),
        };
        table.add_row(row![status.name, status.category, text]);
    }
    table.to_string()
}

pub fn render_results(batch: &BatchResults, use_color: bool) -> String {
    let mut table = table_with_titles(row!["Handler", "Result", "Rows", "Files", "Time (s)", "Message"]);
    for (name, result) in batch.iter() {
        let outcome = if result.success { "ok" } else { "FAILED" };
        table.add_row(row![
            name,
            paint(outcome, result.success, use_color),
            r->result.rows_processed,
            r->result.files_produced.len(),
            r->format!("{:.3}", result.execution_time_seconds),
            result.message
        ]);
    }
    let mut out = table.to_string();
    out.push_str(&render_summary(&batch.summary()));
    out
}

pub fn render_summary(summary: &ResultsSummary) -> String {
    format!(
        "{} handler(s): {} succeeded, {} failed, {} row(s), {} file(s) in {:.3}s\n",
        summary.total,
        summary.successful,
        summary.failed,
        summary.total_rows,
        summary.total_files,
        summary.total_time
    )
}

pub fn render_schema(name: &str, schema: &ConfigSchema) -> String {
    if schema.is_empty() {
        return format!("Handler '{}' has no configuration keys.\n", name);
    }
    let mut table = table_with_titles(row!["Key", "Label", "Type", "Required", "Default", "Description"]);
    for (key, field) in schema {
        let default = field
            .default
            .as_ref()
            .map(|value| match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        let mut description = field.description.clone();
        if !field.options.is_empty() {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(&format!("[{}]", field.options.join("|")));
        }
        table.add_row(row![
            key,
            field.label,
            format!("{:?}", field.field_type).to_lowercase(),
            if field.required { "yes" } else { "" },
            default,
            description
        ]);
    }
    table.to_string()
}

pub fn render_validation(name: &str, report: &ValidationReport, use_color: bool) -> String {
    if report.valid {
        return format!("{}: {}\n", name, paint("valid", true, use_color));
    }
    let mut out = format!("{}: {}\n", name, paint("invalid", false, use_color));
    for error in &report.errors {
        out.push_str(&format!("  - {}\n", error));
    }
    out
}
