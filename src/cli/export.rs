//! Export command for extracting a page's component layout from a saved record.

use crate::cli::common::{CliError, CliResult};
use crate::models::PageRecord;
use crate::services::{decode_record, export_layout};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Export the component layout of a saved page record
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to the page record JSON file
    #[arg(short, long, value_name = "FILE")]
    pub record: PathBuf,

    /// Output path (prints to stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let content = fs::read_to_string(&self.record)
            .map_err(|e| CliError::io(format!("Failed to read record: {e}")))?;
        let record: PageRecord = serde_json::from_str(&content)
            .map_err(|e| CliError::validation(format!("Not a page record: {e}")))?;

        let page = decode_record(&record).ok_or_else(|| {
            CliError::validation(format!("Record {} has unreadable content", record.id))
        })?;
        let layout = export_layout(&page.items);

        match &self.output {
            Some(path) => {
                fs::write(path, layout)
                    .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))?;
                eprintln!("✓ Exported {} components to: {}", page.items.len(), path.display());
            }
            None => println!("{layout}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::ExitCode;
    use crate::editor::EditorState;
    use crate::models::{ComponentKind, Page, PageDraft};
    use crate::services::{encode_page, import_layout};
    use tempfile::TempDir;

    fn write_record(dir: &TempDir, draft: PageDraft) -> PathBuf {
        let record = PageRecord::from_draft("alice", draft);
        let path = dir.path().join(format!("{}.json", record.id));
        fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = EditorState::default();
        state.add_component(ComponentKind::Navbar, None, None);
        state.add_component(ComponentKind::Image, None, None);
        let draft = encode_page(&state.to_page("Home")).unwrap();

        let output = temp_dir.path().join("layout.json");
        let args = ExportArgs {
            record: write_record(&temp_dir, draft),
            output: Some(output.clone()),
        };
        args.execute().unwrap();

        let exported = import_layout(&fs::read_to_string(output).unwrap());
        assert_eq!(exported, state.items());
    }

    #[test]
    fn test_export_unreadable_record() {
        let temp_dir = TempDir::new().unwrap();
        let mut draft = encode_page(&Page::new("Broken")).unwrap();
        draft.items = "not json".to_string();

        let args = ExportArgs {
            record: write_record(&temp_dir, draft),
            output: None,
        };
        assert_eq!(args.execute().unwrap_err().kind, ExitCode::ValidationError);
    }

    #[test]
    fn test_export_missing_record() {
        let args = ExportArgs {
            record: PathBuf::from("/nonexistent/record.json"),
            output: None,
        };
        assert_eq!(args.execute().unwrap_err().kind, ExitCode::IoError);
    }
}
