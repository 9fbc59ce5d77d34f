//! Whole-document persistence.
//!
//! Every operation loads the full document, mutates it, and writes it back in full.
//! Nothing is cached between calls, so each `load` sees the latest `save`.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Storage for a single document of type `D`.
pub trait DocumentStore<D> {
    /// Current document, or `D::default()` when nothing has been stored yet.
    fn load(&self) -> Result<D>;

    /// Replace the stored document unconditionally.
    fn save(&self, doc: &D) -> Result<()>;
}

/// A document kept as one pretty-printed JSON file at a fixed path.
#[derive(Debug)]
pub struct JsonFileStore<D> {
    path: PathBuf,
    _doc: PhantomData<fn() -> D>,
}

impl<D> JsonFileStore<D> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<D> DocumentStore<D> for JsonFileStore<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> Result<D> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, using empty document");
                return Ok(D::default());
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        debug!(path = %self.path.display(), bytes = text.len(), "loaded state file");
        serde_json::from_str(&text).map_err(|source| Error::CorruptState {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, doc: &D) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))?;
        debug!(path = %self.path.display(), "saved state file");
        Ok(())
    }
}

/// In-process store. Counts saves so callers can tell reads from writes.
#[derive(Debug, Default)]
pub struct MemoryStore<D> {
    doc: Mutex<Option<D>>,
    saves: AtomicUsize,
}

impl<D> MemoryStore<D> {
    pub fn new() -> Self {
        MemoryStore {
            doc: Mutex::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times `save` has been called
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<D: Clone + Default> DocumentStore<D> for MemoryStore<D> {
    fn load(&self) -> Result<D> {
        let guard = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, doc: &D) -> Result<()> {
        let mut guard = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectDocument;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::<ProjectDocument>::new(temp.path().join("pm_state.json"));

        let doc = store.load().unwrap();
        assert_eq!(doc, ProjectDocument::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".context").join("nested").join("pm_state.json");
        let store = JsonFileStore::<ProjectDocument>::new(&path);

        let doc = ProjectDocument::initialized("Demo");
        store.save(&doc).unwrap();

        assert!(path.exists());
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::<ProjectDocument>::new(temp.path().join("pm_state.json"));

        store.save(&ProjectDocument::initialized("First")).unwrap();
        store.save(&ProjectDocument::initialized("Second")).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.project_name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_corrupt_file_is_a_hard_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pm_state.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::<ProjectDocument>::new(&path);

        let result = store.load();
        assert!(matches!(result, Err(Error::CorruptState { .. })));
        // The broken file is left for the operator to inspect
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pm_state.json");
        fs::write(&path, r#"{"tasks": "nope"}"#).unwrap();
        let store = JsonFileStore::<ProjectDocument>::new(&path);

        assert!(matches!(store.load(), Err(Error::CorruptState { .. })));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemoryStore::<ProjectDocument>::new();
        assert_eq!(store.load().unwrap(), ProjectDocument::default());
        assert_eq!(store.saves(), 0);

        store.save(&ProjectDocument::initialized("Demo")).unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap().project_name.as_deref(), Some("Demo"));
    }
}
