//! Clipboard functionality for component copy/cut/paste operations.
//!
//! The clipboard holds at most one component. Pasting does not consume it,
//! so the same component can be pasted repeatedly.

use crate::editor::factory::{clone_component, DEFAULT_CLONE_OFFSET};
use crate::models::ComponentItem;

/// Single-slot component clipboard.
#[derive(Debug, Clone, Default)]
pub struct ComponentClipboard {
    /// Stored structural copy
    content: Option<ComponentItem>,
}

impl ComponentClipboard {
    /// Create a new empty clipboard.
    #[must_use]
    pub const fn new() -> Self {
        Self { content: None }
    }

    /// Store a copy of `item`, replacing any previous content.
    ///
    /// Returns a description of what was copied for status message.
    pub fn store(&mut self, item: &ComponentItem) -> String {
        self.content = Some(item.clone());
        format!("Copied: {} ({})", item.kind().display_name(), item.id)
    }

    /// Check if there is content to paste.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Get the clipboard content.
    #[must_use]
    pub fn get_content(&self) -> Option<&ComponentItem> {
        self.content.as_ref()
    }

    /// Build the item a paste would insert, under `new_id`.
    ///
    /// Returns `None` when the clipboard is empty. The content is kept.
    #[must_use]
    pub fn paste_as(&self, new_id: &str) -> Option<ComponentItem> {
        self.content
            .as_ref()
            .map(|item| clone_component(item, new_id, DEFAULT_CLONE_OFFSET))
    }

    /// Clear the clipboard.
    pub fn clear(&mut self) {
        self.content = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::factory::create_component;
    use crate::models::{ComponentKind, GoogleFont, GridPosition};

    fn button(id: &str) -> ComponentItem {
        create_component(ComponentKind::Button, id, GridPosition::new(4, 4), GoogleFont::Inter)
    }

    #[test]
    fn test_clipboard_new() {
        let clipboard = ComponentClipboard::new();
        assert!(!clipboard.has_content());
        assert!(clipboard.paste_as("item-9").is_none());
    }

    #[test]
    fn test_clipboard_store() {
        let mut clipboard = ComponentClipboard::new();
        let msg = clipboard.store(&button("item-1"));

        assert!(clipboard.has_content());
        assert!(msg.contains("Copied: Button"));
        assert_eq!(clipboard.get_content().unwrap().id, "item-1");
    }

    #[test]
    fn test_store_overwrites_previous_content() {
        let mut clipboard = ComponentClipboard::new();
        clipboard.store(&button("item-1"));
        clipboard.store(&button("item-2"));

        assert_eq!(clipboard.get_content().unwrap().id, "item-2");
    }

    #[test]
    fn test_paste_keeps_content() {
        let mut clipboard = ComponentClipboard::new();
        clipboard.store(&button("item-1"));

        let first = clipboard.paste_as("item-2").unwrap();
        let second = clipboard.paste_as("item-3").unwrap();

        assert_eq!((first.x, first.y), (5, 5));
        assert_eq!(second.id, "item-3");
        assert!(clipboard.has_content());
    }

    #[test]
    fn test_clipboard_clear() {
        let mut clipboard = ComponentClipboard::new();
        clipboard.store(&button("item-1"));

        clipboard.clear();

        assert!(!clipboard.has_content());
    }
}
