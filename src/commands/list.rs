use super::emit_json;
use crate::error::Result;
use crate::host::McpHost;
use crate::manager::InstalledPackage;
use crate::ui as output;
use colored::Colorize;

pub fn run(host: &McpHost, json: bool) -> Result<bool> {
    let response = host.list();
    if json {
        emit_json(&response)?;
        return Ok(response.success);
    }

    if let Some(error) = &response.error {
        output::error(error);
        return Ok(false);
    }

    if response.packages.is_empty() {
        output::info("No packages installed");
        return Ok(true);
    }

    output::header(&format!("Installed packages ({})", response.packages.len()));
    for package in &response.packages {
        display_package(package);
    }
    Ok(true)
}

fn display_package(package: &InstalledPackage) {
    match (&package.record, &package.problem) {
        (Some(record), _) => {
            let status = if package.artifact_present {
                "✓".green()
            } else {
                "missing".red()
            };
            output::indent(
                &format!(
                    "{} {} {} {}",
                    status,
                    record.id.bold(),
                    record.version.dimmed(),
                    record.install_path.display()
                ),
                1,
            );
        }
        (None, Some(problem)) => {
            output::indent(&format!("{} {} {}", "✗".red(), package.id.bold(), problem), 1);
        }
        (None, None) => output::indent(&package.id, 1),
    }
}
