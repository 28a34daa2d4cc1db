//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and reserved identifiers.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Pagesmith";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "pagesmith";

/// Prefix of minted component ids (e.g., "item-3").
pub const ITEM_ID_PREFIX: &str = "item";

/// Id of the placeholder the grid widget inserts while a palette drag hovers the canvas.
pub const DROPPING_ITEM_ID: &str = "__dropping-elem__";
