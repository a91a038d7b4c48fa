//! The init, check and update commands
//!
//! Each command enumerates files under a root, hashes them one at a time in
//! enumeration order and reads or writes the store. A failure tied to one
//! file is recorded in that file's outcome and the command moves on; a
//! failure to enumerate, or a store that cannot be loaded at all, ends the
//! command with an error.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::store::DigestStore;
use crate::error::{IntegrityError, Result};
use crate::reporting::Reporter;
use crate::scanner::{compute_digest, list_files, FileDigest};

/// Which command produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Init,
    Check,
    Update,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Init => "init",
            Command::Check => "check",
            Command::Update => "update",
        };
        f.write_str(name)
    }
}

/// Step at which a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Hashing,
    Storing,
}

/// What happened to one file.
#[derive(Debug)]
pub enum Outcome {
    /// Digest was written to the store (init, update).
    Recorded(FileDigest),
    /// No stored digest exists (check).
    Untracked,
    /// Current digest equals the stored one (check).
    Unmodified,
    /// Current digest differs from the stored one (check).
    Modified {
        stored: FileDigest,
        current: FileDigest,
    },
    Failed {
        stage: Stage,
        error: IntegrityError,
    },
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Per-file outcomes of one command run, in enumeration order.
#[derive(Debug)]
pub struct CommandReport {
    pub command: Command,
    pub root: PathBuf,
    pub files: Vec<FileReport>,
}

impl CommandReport {
    fn new(command: Command, root: &Path) -> Self {
        Self {
            command,
            root: root.to_path_buf(),
            files: Vec::new(),
        }
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn recorded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Recorded(_)))
    }

    pub fn untracked(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Untracked))
    }

    pub fn unmodified(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unmodified))
    }

    pub fn modified(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Modified { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }
}

/// Store key for a scanned path. Paths are used exactly as enumerated,
/// except that non-UTF-8 bytes become U+FFFD since JSON keys are strings;
/// two such paths differing only in those bytes share one key.
fn store_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Turn a store error into a per-file failure, or abort when it is fatal.
fn recover(stage: Stage, error: IntegrityError) -> Result<Outcome> {
    if error.is_fatal() {
        return Err(error);
    }
    Ok(Outcome::Failed { stage, error })
}

/// Hash every file under `root` and record it, overwriting prior entries.
pub fn initialize(
    root: &Path,
    store: &DigestStore,
    reporter: &mut dyn Reporter,
) -> Result<CommandReport> {
    record_all(Command::Init, root, store, reporter)
}

/// Hash every file under `root` and record it, whether or not it changed.
pub fn update(
    root: &Path,
    store: &DigestStore,
    reporter: &mut dyn Reporter,
) -> Result<CommandReport> {
    record_all(Command::Update, root, store, reporter)
}

fn record_all(
    command: Command,
    root: &Path,
    store: &DigestStore,
    reporter: &mut dyn Reporter,
) -> Result<CommandReport> {
    let files = enumerate(command, root)?;
    tracing::info!(%command, root = %root.display(), files = files.len(), store = %store.path().display(), "starting");
    reporter.begin(command, root)?;

    let mut report = CommandReport::new(command, root);
    for path in files {
        reporter.before_file(command, &path)?;
        let outcome = match compute_digest(&path) {
            Err(error) => recover(Stage::Hashing, error)?,
            Ok(digest) => {
                tracing::debug!(file = %path.display(), %digest, "hashed");
                match store.set(&store_key(&path), digest.clone()) {
                    Ok(()) => Outcome::Recorded(digest),
                    Err(error) => recover(Stage::Storing, error)
                        .inspect_err(|e| tracing::error!(error = %e.chain(), "store unusable"))?,
                }
            }
        };
        push(&mut report, reporter, path, outcome)?;
    }

    tracing::info!(%command, recorded = report.recorded(), failed = report.failed(), "finished");
    reporter.finish(&report)?;
    Ok(report)
}

/// Compare every file under `root` against its stored digest. Never writes.
pub fn check(
    root: &Path,
    store: &DigestStore,
    reporter: &mut dyn Reporter,
) -> Result<CommandReport> {
    let command = Command::Check;
    let files = enumerate(command, root)?;
    tracing::info!(%command, root = %root.display(), files = files.len(), store = %store.path().display(), "starting");
    reporter.begin(command, root)?;

    let mut report = CommandReport::new(command, root);
    for path in files {
        reporter.before_file(command, &path)?;
        let outcome = match compute_digest(&path) {
            Err(error) => recover(Stage::Hashing, error)?,
            Ok(current) => match store.get(&store_key(&path)) {
                // Lookups only fail when the store cannot be loaded at all
                Err(error) => {
                    tracing::error!(error = %error.chain(), "store unusable");
                    return Err(error);
                }
                Ok(None) => Outcome::Untracked,
                Ok(Some(stored)) if stored == current => Outcome::Unmodified,
                Ok(Some(stored)) => Outcome::Modified { stored, current },
            },
        };
        push(&mut report, reporter, path, outcome)?;
    }

    tracing::info!(
        %command,
        unmodified = report.unmodified(),
        modified = report.modified(),
        untracked = report.untracked(),
        failed = report.failed(),
        "finished"
    );
    reporter.finish(&report)?;
    Ok(report)
}

fn enumerate(command: Command, root: &Path) -> Result<Vec<PathBuf>> {
    list_files(root).inspect_err(|e| {
        tracing::error!(%command, root = %root.display(), error = %e.chain(), "enumeration failed");
    })
}

fn push(
    report: &mut CommandReport,
    reporter: &mut dyn Reporter,
    path: PathBuf,
    outcome: Outcome,
) -> Result<()> {
    if let Outcome::Failed { stage, error } = &outcome {
        tracing::warn!(file = %path.display(), ?stage, error = %error.chain(), "skipping file");
    }
    let file = FileReport { path, outcome };
    reporter.file(report.command, &file)?;
    report.files.push(file);
    Ok(())
}
