use crate::error::{McpkgError, Result};
use crate::registry::types::InstallRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Replace `path` with `record` so readers see either the old or the new file
pub(super) fn write_record_atomically(path: &Path, record: &InstallRecord) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        McpkgError::PathError(format!(
            "Invalid record path (no parent directory): {}",
            path.display()
        ))
    })?;

    let content = serde_json::to_string_pretty(record).map_err(|e| McpkgError::CorruptRecord {
        id: record.id.clone(),
        reason: "record serialization failed".to_string(),
        source: Some(e),
    })?;

    let _: InstallRecord = serde_json::from_str(&content).map_err(|e| McpkgError::CorruptRecord {
        id: record.id.clone(),
        reason: "invalid JSON generated".to_string(),
        source: Some(e),
    })?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file =
        fs::File::create(&tmp_path).map_err(|e| McpkgError::registry_io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| McpkgError::registry_io(&tmp_path, e))?;
    drop(tmp_file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(McpkgError::registry_io(path, e));
    }

    if let Ok(dir_file) = fs::File::open(dir)
        && let Err(e) = dir_file.sync_all()
    {
        tracing::warn!(dir = %dir.display(), error = %e, "failed to sync registry directory");
    }

    Ok(())
}
