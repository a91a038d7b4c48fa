//! Digest store and the commands built on it

pub mod commands;
pub mod store;

pub use commands::{check, initialize, update, Command, CommandReport, FileReport, Outcome, Stage};
pub use store::{DigestStore, HashStore, DEFAULT_STORE_FILE};
