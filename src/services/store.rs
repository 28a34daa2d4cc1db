//! Storage backends for persisted page records.
//!
//! `PageStore` is deliberately dumb: it stores and returns whole records.
//! Ownership checks live in [`crate::services::pages::PageService`].

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::PageRecord;

/// Record storage used by the persistence API.
pub trait PageStore: Send + Sync {
    /// All records owned by `user_id`, newest update first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<PageRecord>>;

    /// Record by id.
    fn get(&self, id: &str) -> Result<Option<PageRecord>>;

    /// Inserts a new record.
    fn insert(&self, record: &PageRecord) -> Result<()>;

    /// Replaces an existing record.
    fn update(&self, record: &PageRecord) -> Result<()>;

    /// Removes a record. Returns false if it did not exist.
    fn remove(&self, id: &str) -> Result<bool>;
}

fn sort_newest_first(records: &mut [PageRecord]) {
    records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// In-memory store, used by tests and `serve --ephemeral`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, PageRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, PageRecord>>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("Page store lock poisoned"))
    }
}

impl PageStore for MemoryStore {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<PageRecord>> {
        let mut records: Vec<PageRecord> = self
            .records()?
            .values()
            .filter(|record| record.is_owned_by(user_id))
            .cloned()
            .collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn get(&self, id: &str) -> Result<Option<PageRecord>> {
        Ok(self.records()?.get(id).cloned())
    }

    fn insert(&self, record: &PageRecord) -> Result<()> {
        let mut records = self.records()?;
        if records.contains_key(&record.id) {
            anyhow::bail!("Page record already exists: {}", record.id);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn update(&self, record: &PageRecord) -> Result<()> {
        let mut records = self.records()?;
        let slot = records
            .get_mut(&record.id)
            .with_context(|| format!("Page record not found: {}", record.id))?;
        *slot = record.clone();
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.records()?.remove(id).is_some())
    }
}

/// Store keeping one JSON file per record in a directory.
///
/// Writes go through a temp file + rename so a record file is never left
/// half-written.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory: {}", root.display()))?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a record file, rejecting ids that could escape the root.
    fn record_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            anyhow::bail!("Invalid record id: {id:?}");
        }
        Ok(self.root.join(format!("{id}.json")))
    }

    fn read_record(path: &Path) -> Result<PageRecord> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page record: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse page record: {}", path.display()))
    }

    fn write_record(&self, record: &PageRecord) -> Result<()> {
        let path = self.record_path(&record.id)?;
        let temp_path = path.with_extension("json.tmp");
        let content =
            serde_json::to_string_pretty(record).context("Failed to serialize page record")?;

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp record file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace record file: {}", path.display()))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow!("Page store lock poisoned"))
    }
}

impl PageStore for FileStore {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<PageRecord>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to read data directory: {}", self.root.display()))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) if record.is_owned_by(user_id) => records.push(record),
                Ok(_) => {}
                // Skip files that aren't page records
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "Skipping unreadable record file");
                }
            }
        }

        sort_newest_first(&mut records);
        Ok(records)
    }

    fn get(&self, id: &str) -> Result<Option<PageRecord>> {
        let path = self.record_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_record(&path).map(Some)
    }

    fn insert(&self, record: &PageRecord) -> Result<()> {
        let _guard = self.lock()?;
        if self.record_path(&record.id)?.exists() {
            anyhow::bail!("Page record already exists: {}", record.id);
        }
        self.write_record(record)
    }

    fn update(&self, record: &PageRecord) -> Result<()> {
        let _guard = self.lock()?;
        if !self.record_path(&record.id)?.exists() {
            anyhow::bail!("Page record not found: {}", record.id);
        }
        self.write_record(record)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let _guard = self.lock()?;
        let path = self.record_path(id)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove record file: {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageDraft;
    use tempfile::TempDir;

    fn draft(title: &str) -> PageDraft {
        PageDraft {
            title: title.to_string(),
            items: "[]".to_string(),
            page_settings: "{}".to_string(),
            next_id: 1,
        }
    }

    fn exercise_store(store: &dyn PageStore) {
        let mine = PageRecord::from_draft("alice", draft("Mine"));
        let theirs = PageRecord::from_draft("bob", draft("Theirs"));
        store.insert(&mine).unwrap();
        store.insert(&theirs).unwrap();
        assert!(store.insert(&mine).is_err());

        let listed = store.list_for_user("alice").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Mine");

        let mut updated = mine.clone();
        updated.apply_draft(draft("Renamed"));
        store.update(&updated).unwrap();
        assert_eq!(store.get(&mine.id).unwrap().unwrap().title, "Renamed");

        assert!(store.remove(&mine.id).unwrap());
        assert!(!store.remove(&mine.id).unwrap());
        assert!(store.get(&mine.id).unwrap().is_none());
        assert!(store.update(&updated).is_err());
    }

    #[test]
    fn test_memory_store() {
        exercise_store(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("pages")).unwrap();
        exercise_store(&store);
    }

    #[test]
    fn test_file_store_rejects_traversal_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert!(store.get("../etc/passwd").is_err());
        assert!(store.get("").is_err());
        assert!(store.remove("a/b").is_err());
    }

    #[test]
    fn test_file_store_skips_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        fs::write(temp_dir.path().join("notes.json"), "{not a record").unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "hello").unwrap();

        store.insert(&PageRecord::from_draft("alice", draft("Mine"))).unwrap();
        assert_eq!(store.list_for_user("alice").unwrap().len(), 1);
    }
}
