use super::emit_json;
use crate::error::Result;
use crate::host::McpHost;
use crate::project_identity;
use crate::ui as output;

pub fn run(host: &McpHost, id: &str, json: bool) -> Result<bool> {
    let response = host.get_install_info(id);
    if json {
        emit_json(&response)?;
        return Ok(response.success);
    }

    if let Some(error) = &response.error {
        output::error(error);
        return Ok(false);
    }

    match &response.record {
        Some(record) => {
            output::header(&record.name);
            output::keyval("Id", &record.id);
            output::keyval("Version", &record.version);
            output::keyval("Path", &record.install_path.display().to_string());
            output::keyval("Installed", &record.installed_at.to_rfc3339());
            if !record.install_path.exists() {
                output::warning("Installed artifact is missing from disk");
            }
        }
        None => output::info(&format!(
            "{} is not installed (see '{}')",
            id,
            project_identity::cli_with("list")
        )),
    }
    Ok(true)
}
