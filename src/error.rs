//! Error types for scanning, hashing and the digest store.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while running an integrity command.
///
/// Variants fall into two severity tiers, see [`IntegrityError::is_fatal`].
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("path does not exist: {}", path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error scanning directory {}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot open file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("hash store {} is corrupt", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error reading hash store {}", path.display())]
    StoreRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing hash store {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing output to {target}")]
    Output {
        target: String,
        #[source]
        source: io::Error,
    },
}

impl IntegrityError {
    /// Whether this error aborts the whole command.
    ///
    /// Enumeration failures and an unusable store stop everything. Failures
    /// tied to a single file are reported and that file is skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            IntegrityError::FileOpen { .. }
                | IntegrityError::Read { .. }
                | IntegrityError::Persist { .. }
        )
    }

    /// Render the error with its full cause chain on one line.
    ///
    /// A cause whose text already ends the message is skipped; walkdir
    /// errors repeat their io error both in `Display` and as `source`.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = std::error::Error::source(cause);
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, IntegrityError>;
