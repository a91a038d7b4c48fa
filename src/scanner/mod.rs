//! File enumeration and content hashing

pub mod file_scanner;
pub mod hasher;

pub use file_scanner::list_files;
pub use hasher::{compute_digest, FileDigest};
