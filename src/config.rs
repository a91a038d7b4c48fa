//! Runtime configuration threaded through the commands

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::store::{DigestStore, DEFAULT_STORE_FILE};

/// Environment variable naming the store document.
pub const STORE_ENV: &str = "INTEGRITY_STORE";

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON digest store.
    pub store_path: PathBuf,
    /// Emit ANSI colors on stdout.
    pub color: bool,
    /// Also write a plain-text report here.
    pub report_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            color: false,
            report_path: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn store(&self) -> DigestStore {
        DigestStore::new(&self.store_path)
    }
}

/// Decide whether stdout gets colors.
///
/// `--no-color` and a non-empty `NO_COLOR` both disable them, and so does a
/// stdout that is not a terminal.
pub fn color_enabled(no_color_flag: bool) -> bool {
    decide_color(
        no_color_flag,
        std::env::var_os("NO_COLOR"),
        std::io::stdout().is_terminal(),
    )
}

fn decide_color(no_color_flag: bool, no_color_env: Option<OsString>, is_terminal: bool) -> bool {
    let env_disabled = no_color_env.is_some_and(|v| !v.is_empty());
    !no_color_flag && !env_disabled && is_terminal
}
