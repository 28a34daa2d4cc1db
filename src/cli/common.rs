//! Shared types for CLI commands: error kinds, exit codes, and input loading.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::models::{PageRecord, PageSettings};

/// Process exit codes used by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was read but failed validation
    ValidationError = 1,
    /// Input could not be read or output could not be written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a command, carrying the exit code to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code
    pub kind: ExitCode,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// Validation failure (exit 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Raw component entries read from a file, with page settings when known.
#[derive(Debug, Clone)]
pub struct LayoutInput {
    /// Undecoded component entries
    pub entries: Vec<Value>,
    /// Page settings, present when the file was a page record
    pub settings: Option<PageSettings>,
}

/// Reads a layout file.
///
/// Accepts either a bare JSON array of components (as written by `export`)
/// or a persisted page record whose `items` field holds that array.
pub fn load_layout_input(path: &Path) -> CliResult<LayoutInput> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| CliError::validation(format!("Invalid JSON in {}: {e}", path.display())))?;

    match value {
        Value::Array(entries) => Ok(LayoutInput {
            entries,
            settings: None,
        }),
        Value::Object(_) => {
            let record: PageRecord = serde_json::from_value(value)
                .map_err(|e| CliError::validation(format!("Not a page record: {e}")))?;
            let entries: Vec<Value> = serde_json::from_str(&record.items).map_err(|e| {
                CliError::validation(format!("Record items are not a JSON array: {e}"))
            })?;
            let settings: PageSettings =
                serde_json::from_str(&record.page_settings).map_err(|e| {
                    CliError::validation(format!("Record page settings are invalid: {e}"))
                })?;
            Ok(LayoutInput {
                entries,
                settings: Some(settings),
            })
        }
        _ => Err(CliError::validation(
            "Expected a component array or a page record",
        )),
    }
}

/// Pretty-prints `value` as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
