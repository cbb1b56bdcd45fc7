use super::emit_json;
use crate::error::Result;
use crate::host::McpHost;
use crate::manager::InstallOptions;
use crate::ui as output;

pub fn run(host: &McpHost, options: &InstallOptions, json: bool) -> Result<bool> {
    let response = host.install(options);
    if json {
        emit_json(&response)?;
        return Ok(response.success);
    }

    match (&response.install_path, &response.error) {
        (Some(path), _) if response.success => {
            output::success(&format!(
                "Installed {} {} to {}",
                options.id,
                options.version,
                path.display()
            ));
            for warning in &response.warnings {
                output::warning(warning);
            }
        }
        (_, Some(error)) => output::error(error),
        _ => output::error(&format!("Failed to install {}", options.id)),
    }
    Ok(response.success)
}
