use super::emit_json;
use crate::error::Result;
use crate::host::McpHost;
use crate::manager::UninstallOptions;
use crate::ui as output;

pub fn run(host: &McpHost, options: &UninstallOptions, json: bool) -> Result<bool> {
    let response = host.uninstall(options);
    if json {
        emit_json(&response)?;
    } else if response.success {
        output::success(&format!("Uninstalled {}", options.id));
    } else if let Some(error) = &response.error {
        output::error(error);
    }
    Ok(response.success)
}
