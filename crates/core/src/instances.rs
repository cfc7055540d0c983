//! Running instance discovery.
//!
//! Asks `s` for the instances of a resource in JSON and turns the answer into
//! selectable [`InstanceChoice`]s. Older `s` releases (and some components)
//! ignore `-o json`, so plain text output is scanned for instance ids as a
//! fallback. The text scan only recognizes the FC ids `c-...` and FC3 ids
//! `i-...`; other id schemes fall back to the first token of each line.
//!
//! Creation times are rendered in local time with the fixed layout
//! `%Y-%m-%d %H:%M:%S` rather than the user's locale conventions.

use chrono::{Local, TimeZone};
use colored::Colorize;
use serde_json::Value;

use crate::{command::ToolCommand, options::Options, runner::CommandRunner};

/// Prefixes of the instance ids `s` prints
const INSTANCE_ID_PREFIXES: [&str; 2] = ["c-", "i-"];

/// An instance offered for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceChoice {
    /// Text shown in the picker
    pub label: String,
    /// Instance id passed back to `s`
    pub id: String,
}

impl InstanceChoice {
    fn bare(id: &str) -> Self {
        Self {
            label: id.to_string(),
            id: id.to_string(),
        }
    }
}

/// List the running instances of `resource`.
///
/// Never fails: every problem is reported on stderr and yields an empty list.
pub fn list_instances(
    resource: &str,
    options: &Options,
    runner: &impl CommandRunner,
) -> Vec<InstanceChoice> {
    if resource.is_empty() {
        eprintln!("{} Resource name is required", "✘".red());
        return Vec::new();
    }

    let command = ToolCommand::instance_listing(options, resource);
    eprintln!(
        "{} Fetching instances for {}...",
        "...".dimmed(),
        resource
    );

    let output = match runner.output(&command) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{} Failed to fetch instances: {:#}", "✘".red(), err);
            return Vec::new();
        }
    };

    if !output.status.success() {
        eprintln!(
            "{} Failed to fetch instances: '{}' returned {}",
            "✘".red(),
            command,
            output.status
        );
        if !output.stderr.trim().is_empty() {
            eprintln!("  {} {}", "details:".dimmed(), output.stderr.trim());
        }
        return Vec::new();
    }

    let instances = parse_listing(&output.stdout);
    if instances.is_empty() {
        eprintln!("{}", format!("No instances found for {}", resource).dimmed());
    }
    instances
}

/// Parse the output of `s instance list`, JSON first, then plain text.
pub fn parse_listing(output: &str) -> Vec<InstanceChoice> {
    if output.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(output) {
        Ok(value) => parse_json_listing(&value),
        Err(_) => scan_text_listing(output),
    }
}

/// Accepts a bare array of instances or `{"instances": [...]}`.
fn parse_json_listing(value: &Value) -> Vec<InstanceChoice> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("instances") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("instanceId")?.as_str()?;
            let created = entry
                .get("createdTimeMs")
                .and_then(Value::as_f64)
                .filter(|ms| *ms > 0.0)
                .and_then(|ms| format_created(ms as i64));

            Some(match created {
                Some(created) => InstanceChoice {
                    label: format!("{} (created: {})", id, created),
                    id: id.to_string(),
                },
                None => InstanceChoice::bare(id),
            })
        })
        .collect()
}

/// Pull instance ids out of human-readable output, one per line.
fn scan_text_listing(output: &str) -> Vec<InstanceChoice> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| INSTANCE_ID_PREFIXES.iter().any(|p| line.contains(p)))
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let first = tokens.clone().next()?;
            let id = tokens
                .find(|t| INSTANCE_ID_PREFIXES.iter().any(|p| t.starts_with(p)))
                .unwrap_or(first);
            Some(InstanceChoice::bare(id))
        })
        .collect()
}

/// Render an epoch-milliseconds timestamp in local time
fn format_created(ms: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}
