//! Progress output and report files

pub mod console;
pub mod report_writer;

pub use console::Console;
pub use report_writer::write_report;

use std::path::Path;

use crate::core::commands::{Command, CommandReport, FileReport};
use crate::error::Result;

/// Receives command progress as files are processed.
///
/// Every method defaults to doing nothing.
pub trait Reporter {
    fn begin(&mut self, _command: Command, _root: &Path) -> Result<()> {
        Ok(())
    }

    fn before_file(&mut self, _command: Command, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn file(&mut self, _command: Command, _file: &FileReport) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, _report: &CommandReport) -> Result<()> {
        Ok(())
    }
}

/// Reporter that discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {}
