//! pacenote-patcher: rename the Pacenote plugin's flat right/left calls
//!
//! Prompts for the drive letter and game folder, then edits
//! `Descriptive.ini` and `strings.ini` in place.

use clap::Parser;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

mod commands;
mod config;
mod logging;
mod pacenote;

#[derive(Parser)]
#[command(name = "pacenote-patcher")]
#[command(about = "Rename flat right/left pacenotes to max right/left", long_about = None)]
#[command(version)]
struct Cli {
    /// Drive letter of the game install (prompts if omitted)
    #[arg(long)]
    drive: Option<String>,

    /// Game folder on that drive, e.g. "Richard Burns Rally" (prompts if omitted)
    #[arg(long)]
    folder: Option<String>,

    /// Game root directory, for systems without drive letters
    #[arg(long, conflicts_with_all = ["drive", "folder"])]
    root: Option<PathBuf>,

    /// JSON file with replacement rules (defaults to the built-in table)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Show what would be changed without writing any file
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    if cli.dry_run {
        println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
    }

    let options = commands::patch::PatchOptions {
        drive: cli.drive,
        folder: cli.folder,
        root: cli.root,
        rules_file: cli.rules,
        dry_run: cli.dry_run,
    };

    match commands::patch::execute(options) {
        Ok(report) => {
            for path in report.failed_files() {
                warn!("Not patched: {}", path.display());
            }
            info!("{} lines changed in total", report.total_changes());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
