//! Page serialization for the persistence API and layout import/export.
//!
//! Pages travel as a [`PageDraft`]: the component list and page settings are
//! JSON documents embedded as strings next to the plain `title` and `nextId`.
//! Decoding never fails outward: a broken record decodes to "no saved page"
//! and a broken import decodes to an empty layout.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::editor::validate_component;
use crate::models::{ComponentItem, Page, PageDraft, PageRecord, PageSettings};

/// Encodes a page into the persistence API's request body.
pub fn encode_page(page: &Page) -> Result<PageDraft> {
    let items = serde_json::to_string(&page.items).context("Failed to encode page items")?;
    let page_settings =
        serde_json::to_string(&page.settings).context("Failed to encode page settings")?;

    Ok(PageDraft {
        title: page.title.clone(),
        items,
        page_settings,
        next_id: page.next_id,
    })
}

/// Decodes a component array entry by entry.
///
/// Fails only when `json` is not a JSON array. Entries that do not decode or
/// validate are dropped with a warning.
fn decode_items(json: &str) -> Result<Vec<ComponentItem>> {
    let entries: Vec<Value> = serde_json::from_str(json).context("Expected a component array")?;

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<ComponentItem>(entry) {
            Ok(item) if validate_component(&item) => Some(item),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping invalid component");
                None
            }
        })
        .collect())
}

/// Decodes the document fields of a draft.
///
/// Unreadable components are dropped; the draft fails only when the item list
/// is not an array or the settings do not parse.
pub fn decode_draft(draft: &PageDraft) -> Result<Page> {
    let items = decode_items(&draft.items).context("Failed to decode page items")?;
    let settings: PageSettings =
        serde_json::from_str(&draft.page_settings).context("Failed to decode page settings")?;

    Ok(Page {
        title: draft.title.clone(),
        items,
        settings,
        next_id: draft.next_id,
    })
}

/// Decodes a stored record, or `None` if its documents are unreadable.
///
/// Individual bad components are dropped. A record whose item list or settings
/// cannot be parsed at all is rejected whole.
#[must_use]
pub fn decode_record(record: &PageRecord) -> Option<Page> {
    let draft = PageDraft {
        title: record.title.clone(),
        items: record.items.clone(),
        page_settings: record.page_settings.clone(),
        next_id: record.next_id,
    };

    match decode_draft(&draft) {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!(
                record = %record.id,
                error = %format!("{e:#}"),
                "Discarding unreadable page record"
            );
            None
        }
    }
}

/// Exports a component list as pretty-printed JSON.
#[must_use]
pub fn export_layout(items: &[ComponentItem]) -> String {
    // A component list is plain data and always encodes.
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

/// Imports a component list, dropping entries that fail to decode or validate.
///
/// Input that is not a JSON array yields an empty list.
#[must_use]
pub fn import_layout(json: &str) -> Vec<ComponentItem> {
    decode_items(json).unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{e:#}"), "Error importing layout");
        Vec::new()
    })
}
