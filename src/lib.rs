//! Integrity Check Library
//!
//! Records SHA-256 digests of files and directory trees in a JSON store and
//! reports which files changed since they were recorded.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod reporting;
pub mod scanner;

pub use crate::core::{commands, store};
pub use error::IntegrityError;
pub use reporting::report_writer;
pub use scanner::{file_scanner, hasher};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::commands::{
        check, initialize, update, Command, CommandReport, FileReport, Outcome, Stage,
    };
    pub use crate::core::store::{DigestStore, HashStore, DEFAULT_STORE_FILE};
    pub use crate::error::IntegrityError;
    pub use crate::reporting::{write_report, Console, Reporter, Silent};
    pub use crate::scanner::{compute_digest, list_files, FileDigest};
}
