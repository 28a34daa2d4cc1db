//! Inspect command: summary of a layout's components, rows, and fonts.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_layout_input, print_json, CliResult};
use crate::editor::fonts::{effective_font, has_custom_font};
use crate::editor::grid::overlapping_pairs;
use crate::models::{ComponentItem, PageSettings};

/// Summarize a component layout or page record
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Layout JSON file or page record
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Layout summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectResponse {
    /// Decoded components
    pub items: usize,
    /// Entries that failed to decode
    pub dropped: usize,
    /// Component count per kind
    pub by_kind: BTreeMap<String, usize>,
    /// Rows spanned by the layout
    pub rows: u32,
    /// Page font, known only for page records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_font: Option<String>,
    /// Component count per effective font
    pub fonts: BTreeMap<String, usize>,
    /// Items with an explicitly chosen font
    pub custom_fonts: Vec<String>,
    /// Overlapping item pairs
    pub overlaps: Vec<(String, String)>,
}

/// Builds the summary for decoded items.
pub fn summarize(
    items: &[ComponentItem],
    dropped: usize,
    settings: Option<&PageSettings>,
) -> InspectResponse {
    let defaults = PageSettings::default();
    let page = settings.unwrap_or(&defaults);

    let mut by_kind = BTreeMap::new();
    let mut fonts = BTreeMap::new();
    for item in items {
        *by_kind.entry(item.kind().to_string()).or_insert(0) += 1;
        *fonts
            .entry(effective_font(item, page).family_name().to_string())
            .or_insert(0) += 1;
    }

    InspectResponse {
        items: items.len(),
        dropped,
        by_kind,
        rows: items.iter().map(|item| item.rect().bottom()).max().unwrap_or(0),
        page_font: settings.map(|s| s.font_family.family_name().to_string()),
        fonts,
        custom_fonts: items
            .iter()
            .filter(|item| has_custom_font(item))
            .map(|item| item.id.clone())
            .collect(),
        overlaps: overlapping_pairs(items),
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let input = load_layout_input(&self.file)?;
        let total = input.entries.len();
        let items: Vec<ComponentItem> = input
            .entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        let summary = summarize(&items, total - items.len(), input.settings.as_ref());

        if self.json {
            return print_json(&summary);
        }

        println!("Components: {}", summary.items);
        if summary.dropped > 0 {
            println!("Unreadable: {}", summary.dropped);
        }
        println!("Rows:       {}", summary.rows);
        if let Some(font) = &summary.page_font {
            println!("Page font:  {font}");
        }

        println!("\nBy kind:");
        for (kind, count) in &summary.by_kind {
            println!("  {kind:<10} {count}");
        }

        if !summary.fonts.is_empty() {
            println!("\nFonts:");
            for (font, count) in &summary.fonts {
                println!("  {font:<18} {count}");
            }
        }
        if !summary.custom_fonts.is_empty() {
            println!("\nCustom fonts: {}", summary.custom_fonts.join(", "));
        }
        if !summary.overlaps.is_empty() {
            println!("\nOverlaps:");
            for (a, b) in &summary.overlaps {
                println!("  {a} / {b}");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::factory::create_component;
    use crate::editor::fonts::set_item_font;
    use crate::models::{ComponentKind, GoogleFont, GridPosition};

    #[test]
    fn test_summarize() {
        let at = |kind: ComponentKind, id: &str, y: u32| {
            create_component(kind, id, GridPosition::new(0, y), GoogleFont::Inter)
        };
        let heading = at(ComponentKind::Heading, "h", 0);
        let image = at(ComponentKind::Image, "img", 4);
        let text = set_item_font(&at(ComponentKind::Text, "t", 2), GoogleFont::Lora);
        let settings = PageSettings {
            font_family: GoogleFont::Roboto,
            ..PageSettings::default()
        };

        let summary = summarize(&[heading, image, text], 1, Some(&settings));

        assert_eq!(summary.items, 3);
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.rows, 10);
        assert_eq!(summary.by_kind["image"], 1);
        assert_eq!(summary.page_font.as_deref(), Some("Roboto"));
        assert_eq!(summary.fonts["Inter"], 1);
        assert_eq!(summary.fonts["Lora"], 1);
        assert_eq!(summary.fonts["Roboto"], 1, "image follows the page font");
        assert_eq!(summary.custom_fonts, vec!["t".to_string()]);
        assert_eq!(summary.overlaps.len(), 2);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], 0, None);
        assert_eq!(summary.rows, 0);
        assert!(summary.page_font.is_none());
        assert!(summary.by_kind.is_empty());
    }
}
