//! Font cascade: items follow the page font until a font is set on them directly.

use crate::models::{ComponentItem, GoogleFont, PageSettings};

/// Font an item renders with: its own font, else the page font.
#[must_use]
pub fn effective_font(item: &ComponentItem, settings: &PageSettings) -> GoogleFont {
    item.data.font_family().unwrap_or(settings.font_family)
}

/// Returns true if the item has detached from the page font.
#[must_use]
pub fn has_custom_font(item: &ComponentItem) -> bool {
    item.data.custom_font_set()
}

/// Rewrites the font of every item still following the page default.
///
/// Items with `customFontSet` are returned unchanged.
#[must_use]
pub fn apply_page_font(items: &[ComponentItem], font: GoogleFont) -> Vec<ComponentItem> {
    items
        .iter()
        .map(|item| {
            let mut updated = item.clone();
            if !has_custom_font(item) {
                updated.data.set_font_family(font, false);
            }
            updated
        })
        .collect()
}

/// Sets a font chosen for this item alone, detaching it from the cascade.
#[must_use]
pub fn set_item_font(item: &ComponentItem, font: GoogleFont) -> ComponentItem {
    let mut updated = item.clone();
    updated.data.set_font_family(font, true);
    updated
}
