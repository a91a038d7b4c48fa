use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use integrity_check::config::{self, Config, STORE_ENV};
use integrity_check::core::store::DEFAULT_STORE_FILE;
use integrity_check::logging;
use integrity_check::prelude::*;

const EXAMPLES: &str = "\
Examples:
  integrity-check init /var/log
  integrity-check check /var/log/syslog
  integrity-check update /var/log/auth.log";

#[derive(Parser)]
#[command(name = "integrity-check")]
#[command(about = "Detect file modifications using stored SHA-256 hashes", long_about = None)]
#[command(version, after_help = EXAMPLES)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// JSON document holding the recorded hashes
    #[arg(long, global = true, env = STORE_ENV, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Also write a plain-text report to this file
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Initialize and store hashes for files
    Init {
        /// File or directory to hash
        path: PathBuf,
    },
    /// Check file integrity against stored hashes
    Check {
        /// File or directory to verify
        path: PathBuf,
    },
    /// Update stored hashes for files
    Update {
        /// File or directory to re-hash
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = Config {
        store_path: cli.store.clone(),
        color: config::color_enabled(cli.no_color),
        report_path: cli.report.clone(),
        verbose: cli.verbose,
    };

    if let Err(e) = logging::init(config.verbose) {
        eprintln!("Warning: failed to initialize logging: {:#}", e);
    }

    let mut console = Console::new(io::stdout().lock(), config.color);
    match run(&cli.command, &config, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = render_error(&e);
            if console.fatal(&message).is_err() {
                eprintln!("Error: {}", message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Join the cause chain, skipping causes already quoted by their parent
fn render_error(e: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in e.chain() {
        let text = cause.to_string();
        if message.ends_with(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

/// Run one command; per-file failures are already reported and do not fail it
fn run<W: io::Write>(command: &CliCommand, config: &Config, console: &mut Console<W>) -> Result<()> {
    let store = config.store();

    let report = match command {
        CliCommand::Init { path } => initialize(path, &store, console),
        CliCommand::Check { path } => check(path, &store, console),
        CliCommand::Update { path } => update(path, &store, console),
    }?;

    if let Some(ref report_path) = config.report_path {
        write_report(report_path, &report)
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
    }

    Ok(())
}
