//! Command dispatcher
//!
//! Routes CLI commands to their handlers. Handlers return whether the
//! operation succeeded; hard errors (bad settings, unwritable storage root)
//! come back as `Err`.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::{Settings, SettingsOverrides};
use crate::error::Result;
use crate::host::McpHost;
use crate::manager::{InstallOptions, PackageManager, UninstallOptions};

pub fn dispatch(args: &Cli) -> Result<bool> {
    if let Command::Completions { shell } = &args.command {
        commands::completions::run(*shell)?;
        return Ok(true);
    }

    let host = build_host(args)?;
    let json = args.global.json;

    match &args.command {
        Command::Install {
            file,
            id,
            name,
            pkg_version,
            target,
        } => commands::install::run(
            &host,
            &InstallOptions {
                id: id.clone(),
                name: name.clone().unwrap_or_else(|| id.clone()),
                version: pkg_version.clone(),
                file_path: file.clone(),
                target_path: target.clone(),
            },
            json,
        ),

        Command::Uninstall { id, path } => commands::uninstall::run(
            &host,
            &UninstallOptions {
                id: id.clone(),
                install_path: path.clone().unwrap_or_default(),
            },
            json,
        ),

        Command::Info { id } => commands::info::run(&host, id, json),

        Command::List => commands::list::run(&host, json),

        Command::Completions { .. } => Ok(true),
    }
}

fn build_host(args: &Cli) -> Result<McpHost> {
    let settings = Settings::resolve(&SettingsOverrides {
        storage_root: args.global.storage_root.clone(),
        applications_dir: args.global.applications_dir.clone(),
    })?;
    tracing::debug!(
        storage_root = %settings.storage_root.display(),
        applications_dir = %settings.applications_dir.display(),
        "resolved settings"
    );

    let manager = PackageManager::from_settings(&settings)?;
    Ok(McpHost::new(manager))
}
