//! Streaming SHA-256 content digests

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{IntegrityError, Result};

const BUFFER_SIZE: usize = 8192;

/// Lowercase hex SHA-256 digest of a file's content.
///
/// Digests produced by [`compute_digest`] are always 64 characters. Values
/// loaded from a store are taken as-is; a malformed one simply never matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileDigest(String);

impl FileDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FileDigest {
    fn from(hex: String) -> Self {
        FileDigest(hex)
    }
}

impl From<&str> for FileDigest {
    fn from(hex: &str) -> Self {
        FileDigest(hex.to_string())
    }
}

/// Compute the SHA-256 digest of a file
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// Hex-encoded digest. The file is read in fixed-size chunks, never whole.
pub fn compute_digest(path: &Path) -> Result<FileDigest> {
    let mut file = File::open(path).map_err(|source| IntegrityError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(IntegrityError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(FileDigest(format!("{:x}", result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_empty_file_digest() {
        let temp_file = NamedTempFile::new().unwrap();

        let digest = compute_digest(temp_file.path()).unwrap();
        assert_eq!(
            digest.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_content_digest() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"hello").unwrap();
        temp_file.flush().unwrap();

        let digest = compute_digest(temp_file.path()).unwrap();
        assert_eq!(
            digest.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(digest.as_str().len(), 64);
    }

    #[test]
    fn test_streamed_digest_matches_one_shot() {
        // Spans several read buffers with a ragged tail
        let content: Vec<u8> = (0..BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&content).unwrap();
        temp_file.flush().unwrap();

        let expected = format!("{:x}", Sha256::digest(&content));
        let digest = compute_digest(temp_file.path()).unwrap();
        assert_eq!(digest.as_str(), expected);
        assert_eq!(compute_digest(temp_file.path()).unwrap(), digest);
    }

    #[test]
    fn test_single_byte_change_alters_digest() {
        let mut first = NamedTempFile::new().unwrap();
        let mut second = NamedTempFile::new().unwrap();
        first.write_all(b"config=1").unwrap();
        second.write_all(b"config=2").unwrap();

        assert_ne!(
            compute_digest(first.path()).unwrap(),
            compute_digest(second.path()).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = compute_digest(&temp_dir.path().join("gone.log")).unwrap_err();
        assert!(matches!(err, IntegrityError::FileOpen { .. }));
        assert!(!err.is_fatal());
    }
}
