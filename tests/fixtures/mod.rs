//! Shared test fixtures for API and CLI tests.
#![allow(dead_code)] // Each test binary uses a different subset

use pagesmith::editor::EditorState;
use pagesmith::models::{
    ComponentKind, GoogleFont, GridPosition, Page, PageDraft, PageRecord, PageSettings,
};
use pagesmith::services::encode_page;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a small page: navbar, heading, and a button with its own font.
pub fn test_page(title: &str) -> Page {
    let mut state = EditorState::new(PageSettings {
        font_family: GoogleFont::Montserrat,
        ..PageSettings::default()
    });
    state.add_component(ComponentKind::Navbar, Some(GridPosition::new(0, 0)), None);
    state.add_component(ComponentKind::Heading, Some(GridPosition::new(0, 4)), None);
    let button = state.add_component(ComponentKind::Button, Some(GridPosition::new(0, 8)), None);
    state.set_item_font(&button, GoogleFont::Lora);
    state.to_page(title)
}

/// Encodes `test_page` as a persistence request body.
pub fn test_draft(title: &str) -> PageDraft {
    encode_page(&test_page(title)).expect("Failed to encode page")
}

/// `test_draft` as a JSON value.
pub fn test_draft_json(title: &str) -> Value {
    serde_json::to_value(test_draft(title)).expect("Failed to serialize draft")
}

/// Writes a page record owned by `user_id` and returns its path.
pub fn write_record_file(dir: &Path, user_id: &str, draft: PageDraft) -> PathBuf {
    let record = PageRecord::from_draft(user_id, draft);
    let path = dir.join(format!("{}.json", record.id));
    fs::write(&path, serde_json::to_string_pretty(&record).expect("Failed to serialize record"))
        .expect("Failed to write record");
    path
}

/// Writes `content` to a file in a fresh temp directory.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    (path, temp_dir)
}
