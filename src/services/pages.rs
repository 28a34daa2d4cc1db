//! Page persistence service and the editor-side save/load session.

use std::fmt;
use std::sync::Arc;

use crate::editor::EditorState;
use crate::models::{Page, PageDraft, PageRecord};
use crate::services::codec::{decode_record, encode_page};
use crate::services::store::PageStore;

/// Failure of a page operation, mapped to an HTTP status by the web layer.
#[derive(Debug)]
pub enum PageError {
    /// No id was supplied where one is required
    MissingId,
    /// No record with this id
    NotFound(String),
    /// Record exists but belongs to someone else
    Forbidden,
    /// Storage backend failed
    Storage(anyhow::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "ID required"),
            Self::NotFound(id) => write!(f, "Website not found: {id}"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::Storage(e) => write!(f, "Storage failure: {e:#}"),
        }
    }
}

impl std::error::Error for PageError {}

impl From<anyhow::Error> for PageError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e)
    }
}

/// Ownership-checked CRUD over a [`PageStore`].
#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn PageStore>,
}

impl PageService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    fn owned_record(&self, user_id: &str, id: &str) -> Result<PageRecord, PageError> {
        let record = self
            .store
            .get(id)?
            .ok_or_else(|| PageError::NotFound(id.to_string()))?;
        if !record.is_owned_by(user_id) {
            tracing::warn!(id, user_id, "Rejected access to another user's page");
            return Err(PageError::Forbidden);
        }
        Ok(record)
    }

    /// Pages owned by `user_id`.
    pub fn list(&self, user_id: &str) -> Result<Vec<PageRecord>, PageError> {
        Ok(self.store.list_for_user(user_id)?)
    }

    /// One page, if `user_id` owns it.
    pub fn get(&self, user_id: &str, id: &str) -> Result<PageRecord, PageError> {
        self.owned_record(user_id, id)
    }

    /// Creates a page owned by `user_id`.
    pub fn create(&self, user_id: &str, draft: PageDraft) -> Result<PageRecord, PageError> {
        let record = PageRecord::from_draft(user_id, draft);
        self.store.insert(&record)?;
        tracing::info!(id = %record.id, user_id, "Created page");
        Ok(record)
    }

    /// Replaces the document of a page owned by `user_id`.
    pub fn update(
        &self,
        user_id: &str,
        id: &str,
        draft: PageDraft,
    ) -> Result<PageRecord, PageError> {
        let mut record = self.owned_record(user_id, id)?;
        record.apply_draft(draft);
        self.store.update(&record)?;
        tracing::info!(id, user_id, "Updated page");
        Ok(record)
    }

    /// Deletes a page owned by `user_id`.
    pub fn delete(&self, user_id: &str, id: Option<&str>) -> Result<(), PageError> {
        let id = id.filter(|id| !id.is_empty()).ok_or(PageError::MissingId)?;
        self.owned_record(user_id, id)?;
        if !self.store.remove(id)? {
            return Err(PageError::NotFound(id.to_string()));
        }
        tracing::info!(id, user_id, "Deleted page");
        Ok(())
    }
}

/// Result of [`EditorSession::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page decoded and installed
    Loaded,
    /// Record was unreadable; the editor starts from an empty page
    Empty,
    /// Service call failed; the editor is unchanged
    Failed(String),
}

/// Result of [`EditorSession::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save created a record with this id
    Created(String),
    /// Existing record replaced
    Updated(String),
    /// Nothing was saved; the user has to save again
    Failed(String),
}

/// An editor bound to a persisted page.
///
/// Load and save never fail outward: failures are logged and reported as
/// outcomes so the editing session keeps running.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Editor state
    pub state: EditorState,
    record_id: Option<String>,
    title: String,
}

impl EditorSession {
    /// Starts an unsaved session.
    #[must_use]
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            record_id: None,
            title: Page::UNTITLED.to_string(),
        }
    }

    /// Id of the backing record, once saved or loaded.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renames the page; takes effect on the next save.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Loads page `id` into the editor.
    pub fn load(&mut self, service: &PageService, user_id: &str, id: &str) -> LoadOutcome {
        let record = match service.get(user_id, id) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(id, error = %e, "Failed to load page");
                return LoadOutcome::Failed(e.to_string());
            }
        };

        self.record_id = Some(record.id.clone());
        self.title = record.title.clone();
        match decode_record(&record) {
            Some(page) => {
                self.state.replace_page(page);
                LoadOutcome::Loaded
            }
            None => {
                self.state.replace_page(Page::new(record.title));
                LoadOutcome::Empty
            }
        }
    }

    /// Saves the whole page, creating the record on first save.
    pub fn save(&mut self, service: &PageService, user_id: &str) -> SaveOutcome {
        let draft = match encode_page(&self.state.to_page(&self.title)) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Failed to encode page");
                return SaveOutcome::Failed(e.to_string());
            }
        };

        let result = match self.record_id.as_deref() {
            Some(id) => service
                .update(user_id, id, draft)
                .map(|record| SaveOutcome::Updated(record.id)),
            None => service.create(user_id, draft).map(|record| SaveOutcome::Created(record.id)),
        };

        match result {
            Ok(outcome) => {
                if let SaveOutcome::Created(id) = &outcome {
                    self.record_id = Some(id.clone());
                }
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save page");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }
}
