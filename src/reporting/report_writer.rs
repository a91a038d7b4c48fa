//! Report writing functionality

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::commands::{CommandReport, Outcome};
use crate::error::{IntegrityError, Result};

/// Write a command's per-file results to a plain-text file
///
/// # Arguments
/// * `output_path` - Path to output file, overwritten if present
/// * `report` - Results of an init, check or update run
pub fn write_report(output_path: &Path, report: &CommandReport) -> Result<()> {
    write_sections(output_path, report).map_err(|source| IntegrityError::Output {
        target: output_path.display().to_string(),
        source,
    })
}

fn write_sections(output_path: &Path, report: &CommandReport) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(output_path)?);

    let generated = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    writeln!(file, "Integrity Report")?;
    writeln!(file, "================")?;
    writeln!(file, "Generated: {} (unix seconds)", generated)?;
    writeln!(file, "Command: {}", report.command)?;
    writeln!(file, "Root: {}", report.root.display())?;
    writeln!(file)?;

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Total files scanned: {}", report.files.len())?;
    writeln!(file, "  Recorded: {}", report.recorded())?;
    writeln!(file, "  Unmodified: {}", report.unmodified())?;
    writeln!(file, "  Modified: {}", report.modified())?;
    writeln!(file, "  Untracked: {}", report.untracked())?;
    writeln!(file, "  Failed: {}", report.failed())?;
    writeln!(file)?;

    let modified: Vec<_> = report
        .files
        .iter()
        .filter_map(|f| match &f.outcome {
            Outcome::Modified { stored, current } => Some((&f.path, stored, current)),
            _ => None,
        })
        .collect();
    if !modified.is_empty() {
        writeln!(file, "Modified Files:")?;
        writeln!(file, "---------------")?;
        for (path, stored, current) in modified {
            writeln!(file, "  {}", path.display())?;
            writeln!(file, "    stored:  {}", stored)?;
            writeln!(file, "    current: {}", current)?;
        }
        writeln!(file)?;
    }

    let untracked: Vec<_> = report
        .files
        .iter()
        .filter(|f| matches!(f.outcome, Outcome::Untracked))
        .collect();
    if !untracked.is_empty() {
        writeln!(file, "Untracked Files:")?;
        writeln!(file, "----------------")?;
        for f in untracked {
            writeln!(file, "  {}", f.path.display())?;
        }
        writeln!(file)?;
    }

    let failed: Vec<_> = report
        .files
        .iter()
        .filter_map(|f| match &f.outcome {
            Outcome::Failed { error, .. } => Some((&f.path, error)),
            _ => None,
        })
        .collect();
    if !failed.is_empty() {
        writeln!(file, "Failed Files:")?;
        writeln!(file, "-------------")?;
        for (path, error) in failed {
            writeln!(file, "  {}: {}", path.display(), error.chain())?;
        }
        writeln!(file)?;
    }

    let recorded: Vec<_> = report
        .files
        .iter()
        .filter_map(|f| match &f.outcome {
            Outcome::Recorded(digest) => Some((&f.path, digest)),
            _ => None,
        })
        .collect();
    if !recorded.is_empty() {
        writeln!(file, "Recorded Files:")?;
        writeln!(file, "---------------")?;
        for (path, digest) in recorded {
            writeln!(file, "  {}  {}", digest, path.display())?;
        }
        writeln!(file)?;
    }

    let unmodified: Vec<_> = report
        .files
        .iter()
        .filter(|f| matches!(f.outcome, Outcome::Unmodified))
        .collect();
    if !unmodified.is_empty() {
        writeln!(file, "Unmodified Files:")?;
        writeln!(file, "-----------------")?;
        for f in unmodified {
            writeln!(file, "  {}", f.path.display())?;
        }
    }

    file.flush()
}
