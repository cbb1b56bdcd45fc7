pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod host;
pub mod manager;
pub mod mount;
pub mod platform;
pub mod project_identity;
pub mod registry;
pub mod traits;
pub mod ui;
pub mod utils;

pub use error::{ErrorKind, McpkgError, Result};
pub use host::McpHost;
pub use manager::{InstallOptions, InstallOutcome, PackageManager, UninstallOptions};
pub use registry::InstallRecord;

use clap::Parser;
use std::process::exit;

/// Exit status after Ctrl-C, as shells report SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Run mcpkg CLI entrypoint.
pub fn run_cli() {
    // 1. Parse & configure output
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::init_logging(args.global.verbose, args.global.quiet);

    // 2. Signal handling: the running operation finishes so records stay consistent
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Interrupted; finishing the current operation.");
    }) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    // 3. Run
    let succeeded = match cli::dispatcher::dispatch(&args) {
        Ok(succeeded) => succeeded,
        Err(e) => {
            ui::error(&e.to_string());
            false
        }
    };

    if ui::is_interrupted() {
        exit(INTERRUPTED_EXIT_CODE);
    }
    if !succeeded {
        exit(1);
    }
}
