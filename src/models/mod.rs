//! Data models for components, pages, and persisted records.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of editing and persistence logic.

pub mod component;
pub mod page;

// Re-export all model types
pub use component::{
    ButtonData, ComponentData, ComponentItem, ComponentKind, ContainerData, FontSize, GoogleFont,
    GridPosition, GridRect, HeaderData, ImageData, NavbarData, NavbarLink, TextAlign, TextStyle,
    VerticalAlign,
};
pub use page::{Page, PageDraft, PageRecord, PageSettings, ThemeMode};
