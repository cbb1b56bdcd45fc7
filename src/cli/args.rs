use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mcpkg",
    about = "Local install manager for MCP packages",
    long_about = "Places downloaded MCP package artifacts on disk, records what was installed, and removes them again",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print host-style JSON responses on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding install records and generic packages
    #[arg(long, value_name = "DIR", global = true, help_heading = "Locations")]
    pub storage_root: Option<PathBuf>,

    /// Directory application bundles are installed into (macOS)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Locations")]
    pub applications_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install a downloaded package artifact
    Install {
        /// Artifact to install (.dmg, .app, or any file)
        file: PathBuf,

        /// Package identifier
        #[arg(long)]
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,

        /// Package version
        #[arg(long, value_name = "VERSION")]
        pkg_version: String,

        /// Directory for generic files instead of <storage-root>/<id>
        #[arg(long, value_name = "DIR")]
        target: Option<PathBuf>,
    },

    /// Remove an installed package and its record
    Uninstall {
        /// Package identifier
        id: String,

        /// Installed path to remove (defaults to the recorded path)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Show the install record of a package
    Info {
        /// Package identifier
        id: String,
    },

    /// List installed packages
    List,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
