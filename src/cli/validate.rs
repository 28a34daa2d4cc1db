//! Validation command for layout files.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::cli::common::{load_layout_input, print_json, CliError, CliResult};
use crate::config::Config;
use crate::editor::grid::overlapping_pairs;
use crate::editor::{validate_component, GridConfig};
use crate::models::ComponentItem;

/// Validate a component layout or page record
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Layout JSON file or page record
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Description
    pub message: String,
    /// Item the finding is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl ValidationMessage {
    fn error(message: impl Into<String>, item: Option<&str>) -> Self {
        Self {
            severity: "error".to_string(),
            message: message.into(),
            item: item.map(str::to_string),
        }
    }

    fn warning(message: impl Into<String>, item: Option<&str>) -> Self {
        Self {
            severity: "warning".to_string(),
            message: message.into(),
            item: item.map(str::to_string),
        }
    }

    fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Validation result.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// True when no errors were found
    pub valid: bool,
    /// Number of entries checked
    pub items: usize,
    /// Errors and warnings
    pub errors: Vec<ValidationMessage>,
}

/// Checks raw component entries against the component model and grid.
pub fn validate_entries(entries: Vec<Value>, grid: &GridConfig) -> ValidationResponse {
    let total = entries.len();
    let mut messages = Vec::new();
    let mut seen = HashSet::new();
    let mut items: Vec<ComponentItem> = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let item: ComponentItem = match serde_json::from_value(entry) {
            Ok(item) => item,
            Err(e) => {
                messages.push(ValidationMessage::error(format!("Entry {index}: {e}"), None));
                continue;
            }
        };

        if !validate_component(&item) {
            messages.push(ValidationMessage::error(
                format!("Entry {index}: missing item id"),
                None,
            ));
            continue;
        }
        if !seen.insert(item.id.clone()) {
            messages.push(ValidationMessage::error("Duplicate item id", Some(&item.id)));
        }
        if !item.satisfies_constraints() {
            messages.push(ValidationMessage::error(
                format!(
                    "Size {}x{} violates constraints (minW {}, minH {}, maxW {})",
                    item.w,
                    item.h,
                    item.min_w(),
                    item.min_h(),
                    item.max_w()
                ),
                Some(&item.id),
            ));
        }
        if item.rect().right() > grid.cols {
            messages.push(ValidationMessage::warning(
                format!("Extends past column {}", grid.cols),
                Some(&item.id),
            ));
        }
        items.push(item);
    }

    for (a, b) in overlapping_pairs(&items) {
        messages.push(ValidationMessage::warning(format!("Overlaps {b}"), Some(&a)));
    }

    ValidationResponse {
        valid: !messages.iter().any(ValidationMessage::is_error),
        items: total,
        errors: messages,
    }
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let input = load_layout_input(&self.file)?;
        let grid = match Config::load() {
            Ok(config) => config.editor.grid,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "Ignoring unreadable config");
                GridConfig::default()
            }
        };
        let response = validate_entries(input.entries, &grid);

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed ({} items)", response.items);
            } else {
                println!("✗ Validation failed");
            }

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    let prefix = if msg.is_error() { "  ✗" } else { "  ⚠" };
                    match &msg.item {
                        Some(item) => println!("{} [{}] {}", prefix, item, msg.message),
                        None => println!("{} {}", prefix, msg.message),
                    }
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !response.errors.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
