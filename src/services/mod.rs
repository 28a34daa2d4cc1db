//! Service layer for persistence.
//!
//! Serialization of pages, record storage backends, and the ownership-checked
//! page service the HTTP API and editor sessions go through.

pub mod codec;
pub mod pages;
pub mod store;

// Re-export commonly used types and functions
pub use codec::{decode_draft, decode_record, encode_page, export_layout, import_layout};
pub use pages::{EditorSession, LoadOutcome, PageError, PageService, SaveOutcome};
pub use store::{FileStore, MemoryStore, PageStore};
