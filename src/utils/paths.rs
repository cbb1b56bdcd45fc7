use crate::error::{McpkgError, Result};
use crate::project_identity;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

pub const LOCKS_DIR_NAME: &str = ".locks";
pub const RECORD_EXTENSION: &str = "json";

pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let user_dirs = UserDirs::new()
        .ok_or_else(|| McpkgError::PathError("Could not determine user home directory".to_string()))?;

    let home = user_dirs.home_dir();

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| McpkgError::PathError(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(
        project_identity::PROJECT_QUALIFIER,
        project_identity::PROJECT_ORG,
        project_identity::BINARY_NAME,
    )
    .ok_or_else(|| McpkgError::PathError("Could not determine user data directory".to_string()))?;
    Ok(proj.data_dir().to_path_buf())
}

/// `<user-data-dir>/mcps`
pub fn default_storage_root() -> Result<PathBuf> {
    Ok(data_dir()?.join(project_identity::STORAGE_DIR_NAME))
}

pub fn record_file(storage_root: &Path, id: &str) -> PathBuf {
    storage_root.join(format!("{}.{}", id, RECORD_EXTENSION))
}

pub fn package_dir(storage_root: &Path, id: &str) -> PathBuf {
    storage_root.join(id)
}

pub fn lock_file(storage_root: &Path, id: &str) -> PathBuf {
    storage_root.join(LOCKS_DIR_NAME).join(format!("{}.lock", id))
}
