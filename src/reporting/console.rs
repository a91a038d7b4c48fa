//! Line-oriented, color-coded command output

use owo_colors::OwoColorize;
use std::io::Write;
use std::path::Path;

use super::Reporter;
use crate::core::commands::{Command, CommandReport, FileReport, Outcome, Stage};
use crate::error::{IntegrityError, Result};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Plain,
    Success,
    Warning,
    Failure,
}

/// Writes one line per file plus a closing summary.
///
/// Green marks success, yellow untracked files, red errors and modified
/// files. Colors are plain ANSI escapes and can be switched off.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, tone: Tone, text: &str) -> Result<()> {
        let result = match (self.color, tone) {
            (false, _) | (true, Tone::Plain) => writeln!(self.out, "{}", text),
            (true, Tone::Success) => writeln!(self.out, "{}", text.green()),
            (true, Tone::Warning) => writeln!(self.out, "{}", text.yellow()),
            (true, Tone::Failure) => writeln!(self.out, "{}", text.red()),
        };
        result.map_err(|source| IntegrityError::Output {
            target: "stdout".to_string(),
            source,
        })
    }

    /// Print a fatal error the way per-file errors are printed.
    pub fn fatal(&mut self, message: &str) -> Result<()> {
        self.line(Tone::Failure, &format!("Error: {}", message))
    }
}

fn failure_verb(command: Command, stage: Stage) -> &'static str {
    match (command, stage) {
        (_, Stage::Hashing) => "hashing",
        (Command::Update, Stage::Storing) => "updating hash for",
        (_, Stage::Storing) => "storing hash for",
    }
}

impl<W: Write> Reporter for Console<W> {
    fn begin(&mut self, command: Command, root: &Path) -> Result<()> {
        if command == Command::Init {
            let text = format!("Initializing integrity database for: {}", root.display());
            self.line(Tone::Plain, &text)?;
        }
        Ok(())
    }

    fn before_file(&mut self, command: Command, path: &Path) -> Result<()> {
        if command == Command::Init {
            self.line(Tone::Plain, &format!("Hashing: {}", path.display()))?;
        }
        Ok(())
    }

    fn file(&mut self, command: Command, file: &FileReport) -> Result<()> {
        let path = file.path.display();
        match &file.outcome {
            Outcome::Failed { stage, error } => {
                let text = format!(
                    "Error {} {}: {}",
                    failure_verb(command, *stage),
                    path,
                    error.chain()
                );
                self.line(Tone::Failure, &text)
            }
            Outcome::Recorded(_) if command == Command::Update => {
                self.line(Tone::Success, &format!("{}: Hash updated successfully", path))
            }
            Outcome::Recorded(_) => Ok(()),
            Outcome::Untracked => {
                self.line(Tone::Warning, &format!("{}: Not tracked (run init first)", path))
            }
            Outcome::Unmodified => self.line(Tone::Success, &format!("{}: Unmodified", path)),
            Outcome::Modified { .. } => {
                self.line(Tone::Failure, &format!("{}: Modified (Hash mismatch)", path))
            }
        }
    }

    fn finish(&mut self, report: &CommandReport) -> Result<()> {
        match report.command {
            Command::Init => {
                let text = format!("Successfully hashed {} file(s).", report.recorded());
                self.line(Tone::Success, &text)
            }
            Command::Update => {
                let text = format!("Updated {} file(s).", report.recorded());
                self.line(Tone::Success, &text)
            }
            Command::Check => {
                self.line(Tone::Plain, "")?;
                let text = format!(
                    "Summary: {} unmodified, {} modified",
                    report.unmodified(),
                    report.modified()
                );
                self.line(Tone::Plain, &text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::{check, initialize};
    use crate::core::store::DigestStore;
    use std::fs;
    use tempfile::TempDir;

    fn render(color: bool, f: impl FnOnce(&mut Console<Vec<u8>>)) -> String {
        let mut console = Console::new(Vec::new(), color);
        f(&mut console);
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_init_then_check_output() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("a");
        fs::create_dir(&root).unwrap();
        let file = root.join("x");
        fs::write(&file, b"hello").unwrap();
        let store = DigestStore::new(temp_dir.path().join("hashes.json"));

        let output = render(false, |console| {
            initialize(&root, &store, console).unwrap();
        });
        assert_eq!(
            output,
            format!(
                "Initializing integrity database for: {}\nHashing: {}\nSuccessfully hashed 1 file(s).\n",
                root.display(),
                file.display()
            )
        );

        let output = render(false, |console| {
            check(&root, &store, console).unwrap();
        });
        assert_eq!(
            output,
            format!(
                "{}: Unmodified\n\nSummary: 1 unmodified, 0 modified\n",
                file.display()
            )
        );
    }

    #[test]
    fn test_untracked_is_reported_but_not_summarized() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("new.log");
        fs::write(&file, b"fresh").unwrap();
        let store = DigestStore::new(temp_dir.path().join("hashes.json"));

        let output = render(false, |console| {
            check(&file, &store, console).unwrap();
        });
        assert!(output.contains("new.log: Not tracked (run init first)"));
        assert!(output.ends_with("Summary: 0 unmodified, 0 modified\n"));
    }

    #[test]
    fn test_color_codes_only_when_enabled() {
        let plain = render(false, |console| console.fatal("boom").unwrap());
        assert_eq!(plain, "Error: boom\n");

        let colored = render(true, |console| console.fatal("boom").unwrap());
        assert!(colored.contains("\u{1b}[31m"));
        assert!(colored.contains("Error: boom"));
    }
}
