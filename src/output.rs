//! Rendering for verification reports and state listings.

use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termtree::Tree;

use crate::control::{ControlReport, Summary};
use crate::terraform::state::{OutputValue, StateFile};

/// Placeholder shown instead of values the state marks sensitive.
const REDACTED: &str = "<sensitive>";

/// Listings clip long values so one giant output cannot wreck the table.
const MAX_VALUE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Table,
    Tree,
    Json,
}

pub fn render_reports(
    reports: &[ControlReport],
    format: Format,
) -> Result<String, serde_json::Error> {
    match format {
        Format::Table => Ok(reports_table(reports)),
        Format::Tree => Ok(reports_tree(reports)),
        Format::Json => reports_json(reports),
    }
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "CONTROL")]
    control: String,
    #[tabled(rename = "CHECK")]
    check: String,
    #[tabled(rename = "EXPECTATION")]
    expectation: String,
    #[tabled(rename = "RESULT")]
    result: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
}

fn reports_table(reports: &[ControlReport]) -> String {
    let rows: Vec<CheckRow> = reports
        .iter()
        .flat_map(|report| {
            report.results.iter().map(|result| CheckRow {
                control: report.control.clone(),
                check: result.title.clone(),
                expectation: result.expectation.describe().to_string(),
                result: result.outcome.as_str().to_string(),
                detail: result.detail.clone().unwrap_or_default(),
            })
        })
        .collect();

    let table = Table::new(rows).with(Style::sharp()).to_string();
    format!("{table}\n{}", summary_line(&Summary::of(reports)))
}

fn reports_tree(reports: &[ControlReport]) -> String {
    let mut rendered = String::new();
    for report in reports {
        let mut tree = Tree::new(format!("control '{}'", report.control));
        for result in &report.results {
            let mut label = format!(
                "{} {} [{}]",
                result.title,
                result.expectation.describe(),
                result.outcome.as_str()
            );
            if let Some(detail) = &result.detail {
                label.push_str(": ");
                label.push_str(detail);
            }
            tree.push(label);
        }
        rendered.push_str(&tree.to_string());
    }
    rendered.push_str(&summary_line(&Summary::of(reports)));
    rendered
}

fn reports_json(reports: &[ControlReport]) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct Document<'a> {
        controls: &'a [ControlReport],
        summary: Summary,
    }

    serde_json::to_string_pretty(&Document {
        controls: reports,
        summary: Summary::of(reports),
    })
}

fn summary_line(summary: &Summary) -> String {
    format!(
        "{} checks: {} passed, {} failed, {} errored",
        summary.total, summary.passed, summary.failed, summary.errors
    )
}

pub fn render_outputs(state: &StateFile, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Table => Ok(outputs_table(state)),
        Format::Tree => Ok(outputs_tree(state)),
        Format::Json => outputs_json(state),
    }
}

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "OUTPUT")]
    name: String,
    #[tabled(rename = "TYPE")]
    type_: String,
    #[tabled(rename = "SENSITIVE")]
    sensitive: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn outputs_table(state: &StateFile) -> String {
    let rows: Vec<OutputRow> = state
        .outputs
        .iter()
        .map(|(name, output)| OutputRow {
            name: name.clone(),
            type_: output.type_summary().to_string(),
            sensitive: if output.sensitive { "yes" } else { "no" }.to_string(),
            value: clip(&display_value(output)),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

fn outputs_tree(state: &StateFile) -> String {
    let mut tree = Tree::new("outputs".to_string());
    for (name, output) in &state.outputs {
        tree.push(format!(
            "{name} ({}): {}",
            output.type_summary(),
            clip(&display_value(output))
        ));
    }
    tree.to_string()
}

fn outputs_json(state: &StateFile) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct OutputEntry<'a> {
        name: &'a str,
        #[serde(rename = "type")]
        type_: &'a str,
        sensitive: bool,
        value: Value,
    }

    let entries: Vec<OutputEntry> = state
        .outputs
        .iter()
        .map(|(name, output)| OutputEntry {
            name,
            type_: output.type_summary(),
            sensitive: output.sensitive,
            value: if output.sensitive {
                Value::String(REDACTED.to_string())
            } else {
                output.value.clone()
            },
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Scalar outputs render bare; compound values render as compact JSON.
fn display_value(output: &OutputValue) -> String {
    if output.sensitive {
        return REDACTED.to_string();
    }
    match &output.value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_VALUE_WIDTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_VALUE_WIDTH).collect();
        format!("{head}...")
    }
}

pub fn render_resources(state: &StateFile, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Table => Ok(resources_table(state)),
        Format::Tree => Ok(resources_tree(state)),
        Format::Json => resources_json(state),
    }
}

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "MODE")]
    mode: String,
    #[tabled(rename = "PROVIDER")]
    provider: String,
    #[tabled(rename = "INSTANCES")]
    instances: usize,
}

fn resources_table(state: &StateFile) -> String {
    let rows: Vec<ResourceRow> = state
        .resources
        .iter()
        .map(|resource| ResourceRow {
            address: resource.address(),
            mode: resource.mode.as_str().to_string(),
            provider: resource.provider.clone(),
            instances: resource.instances.len(),
        })
        .collect();
    Table::new(rows).with(Style::sharp()).to_string()
}

fn resources_tree(state: &StateFile) -> String {
    let mut tree = Tree::new("resources".to_string());
    for resource in &state.resources {
        tree.push(format!("{} ({})", resource.address(), resource.mode.as_str()));
    }
    tree.to_string()
}

fn resources_json(state: &StateFile) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct ResourceEntry<'a> {
        address: String,
        mode: &'a str,
        #[serde(rename = "type")]
        type_: &'a str,
        name: &'a str,
        provider: &'a str,
        instances: usize,
    }

    let entries: Vec<ResourceEntry> = state
        .resources
        .iter()
        .map(|resource| ResourceEntry {
            address: resource.address(),
            mode: resource.mode.as_str(),
            type_: &resource.type_,
            name: &resource.name,
            provider: &resource.provider,
            instances: resource.instances.len(),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Renders a value resolved from the state: scalars print bare, compound
/// values print as pretty JSON.
pub fn render_value(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(_) | Value::Bool(_) => Ok(value.to_string()),
        other => serde_json::to_string_pretty(other),
    }
}
