//! Page-level data: settings, the in-memory page, and persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::component::{ComponentItem, GoogleFont};

/// Canvas color used in dark mode regardless of the configured background.
pub const DARK_CANVAS_COLOR: &str = "#1f2937";

/// Light or dark canvas theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light canvas (uses `background_color`)
    #[default]
    Light,
    /// Dark canvas
    Dark,
}

/// Page-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    /// Canvas background color (hex)
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Maximum render width in pixels, used by preview
    #[serde(default = "default_width")]
    pub width: u32,
    /// Theme mode
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Default font followed by items without an explicit font
    #[serde(default)]
    pub font_family: GoogleFont,
}

fn default_background_color() -> String {
    "#ffffff".to_string()
}

const fn default_width() -> u32 {
    1200
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            width: default_width(),
            theme_mode: ThemeMode::default(),
            font_family: GoogleFont::default(),
        }
    }
}

impl PageSettings {
    /// Background color the canvas is actually painted with.
    #[must_use]
    pub fn canvas_background(&self) -> &str {
        match self.theme_mode {
            ThemeMode::Dark => DARK_CANVAS_COLOR,
            ThemeMode::Light => &self.background_color,
        }
    }
}

/// A complete page as edited in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page title
    pub title: String,
    /// Placed components (order is irrelevant)
    pub items: Vec<ComponentItem>,
    /// Page-wide settings
    pub settings: PageSettings,
    /// Counter used to mint default item ids
    pub next_id: u64,
}

impl Page {
    /// Title used before the user names the page.
    pub const UNTITLED: &'static str = "Untitled Page";

    /// Creates an empty page.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            settings: PageSettings::default(),
            next_id: 1,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::UNTITLED)
    }
}

/// Body sent to the persistence API on create and update.
///
/// `items` and `page_settings` are JSON documents encoded as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDraft {
    /// Page title
    pub title: String,
    /// JSON array of component items
    pub items: String,
    /// JSON object of page settings
    pub page_settings: String,
    /// Id counter
    pub next_id: u64,
}

/// A page as stored by the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Record id (UUID)
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Page title
    pub title: String,
    /// JSON array of component items
    pub items: String,
    /// JSON object of page settings
    pub page_settings: String,
    /// Id counter
    pub next_id: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl PageRecord {
    /// Builds a fresh record owned by `user_id` from a draft.
    pub fn from_draft(user_id: impl Into<String>, draft: PageDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: draft.title,
            items: draft.items,
            page_settings: draft.page_settings,
            next_id: draft.next_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the document fields with a draft (whole-document replace).
    pub fn apply_draft(&mut self, draft: PageDraft) {
        self.title = draft.title;
        self.items = draft.items;
        self.page_settings = draft.page_settings;
        self.next_id = draft.next_id;
        self.updated_at = Utc::now();
    }

    /// Returns true if `user_id` owns this record.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_settings_defaults() {
        let settings = PageSettings::default();
        assert_eq!(settings.background_color, "#ffffff");
        assert_eq!(settings.width, 1200);
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert_eq!(settings.font_family, GoogleFont::Inter);
    }

    #[test]
    fn test_page_settings_partial_json() {
        let settings: PageSettings =
            serde_json::from_str(r##"{"backgroundColor":"#000000","themeMode":"dark"}"##).unwrap();
        assert_eq!(settings.width, 1200);
        assert_eq!(settings.canvas_background(), DARK_CANVAS_COLOR);
    }

    #[test]
    fn test_record_apply_draft_replaces_document() {
        let draft = PageDraft {
            title: "One".to_string(),
            items: "[]".to_string(),
            page_settings: "{}".to_string(),
            next_id: 1,
        };
        let mut record = PageRecord::from_draft("user-1", draft);
        assert!(record.is_owned_by("user-1"));
        assert!(!record.is_owned_by("user-2"));

        record.apply_draft(PageDraft {
            title: "Two".to_string(),
            items: "[{}]".to_string(),
            page_settings: "{}".to_string(),
            next_id: 5,
        });
        assert_eq!(record.title, "Two");
        assert_eq!(record.next_id, 5);
        assert!(record.updated_at >= record.created_at);
    }
}
