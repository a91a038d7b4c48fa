//! Persisted path-to-digest mapping
//!
//! The whole mapping lives in one pretty-printed JSON object. Every read
//! loads the full document and every write replaces it in full. There is
//! no locking: two processes doing `set` against the same document race,
//! and the last writer wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{IntegrityError, Result};
use crate::scanner::hasher::FileDigest;

/// In-memory form of the store: file path key to last recorded digest.
pub type HashStore = BTreeMap<String, FileDigest>;

/// Default document name, resolved against the working directory.
pub const DEFAULT_STORE_FILE: &str = "hashes.json";

/// Handle on the backing JSON document.
#[derive(Debug, Clone)]
pub struct DigestStore {
    path: PathBuf,
}

impl DigestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full mapping
    ///
    /// An absent document is an empty store, not an error.
    pub fn load_all(&self) -> Result<HashStore> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashStore::new()),
            Err(source) => {
                return Err(IntegrityError::StoreRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&data).map_err(|source| IntegrityError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the backing document with `store`
    pub fn save_all(&self, store: &HashStore) -> Result<()> {
        let persist_error = |source: io::Error| IntegrityError::Persist {
            path: self.path.clone(),
            source,
        };

        let data = serde_json::to_string_pretty(store)
            .map_err(|e| persist_error(io::Error::from(e)))?;
        fs::write(&self.path, data).map_err(persist_error)?;

        tracing::debug!(store = %self.path.display(), entries = store.len(), "saved hash store");
        Ok(())
    }

    /// Look up the recorded digest for `file`
    pub fn get(&self, file: &str) -> Result<Option<FileDigest>> {
        let mut store = self.load_all()?;
        Ok(store.remove(file))
    }

    /// Record `digest` for `file`, replacing any previous entry
    pub fn set(&self, file: &str, digest: FileDigest) -> Result<()> {
        let mut store = self.load_all()?;
        store.insert(file.to_string(), digest);
        self.save_all(&store)
    }
}
