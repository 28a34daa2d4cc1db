//! CLI command handlers for Pagesmith.
//!
//! This module provides headless, scriptable access to saved pages and
//! layout files, plus the command that runs the persistence API.

pub mod common;
pub mod export;
pub mod inspect;
#[cfg(feature = "web")]
pub mod serve;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use export::ExportArgs;
pub use inspect::InspectArgs;
#[cfg(feature = "web")]
pub use serve::ServeArgs;
pub use validate::ValidateArgs;
