pub mod locking;
mod persist;

use crate::error::{McpkgError, Result};
use crate::registry::types::{CURRENT_RECORD_SCHEMA_VERSION, InstallRecord};
use crate::traits::InstallRegistry;
use crate::utils::paths;
use persist::write_record_atomically;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON record file per package id under the storage root
#[derive(Debug, Clone)]
pub struct FsRegistry {
    root: PathBuf,
}

impl FsRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        paths::record_file(&self.root, id)
    }
}

impl InstallRegistry for FsRegistry {
    fn read(&self, id: &str) -> Result<Option<InstallRecord>> {
        let path = self.record_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(McpkgError::corrupt(id, format!("unreadable content: {}", e)));
            }
            Err(e) => return Err(McpkgError::registry_io(path, e)),
        };

        parse_record(id, &content).map(Some)
    }

    fn write(&self, record: &InstallRecord) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| McpkgError::registry_io(&self.root, e))?;
        write_record_atomically(&self.record_path(&record.id), record)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(McpkgError::registry_io(path, e)),
        }
    }

    fn ids(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(McpkgError::registry_io(&self.root, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| McpkgError::registry_io(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(paths::RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Parse and check a record read from `<id>.json`
pub(crate) fn parse_record(id: &str, content: &str) -> Result<InstallRecord> {
    let record: InstallRecord =
        serde_json::from_str(content).map_err(|e| McpkgError::CorruptRecord {
            id: id.to_string(),
            reason: "invalid JSON".to_string(),
            source: Some(e),
        })?;

    if record.schema_version > CURRENT_RECORD_SCHEMA_VERSION {
        return Err(McpkgError::corrupt(
            id,
            format!(
                "schema version {} is newer than supported version {}",
                record.schema_version, CURRENT_RECORD_SCHEMA_VERSION
            ),
        ));
    }

    if record.id != id {
        return Err(McpkgError::corrupt(
            id,
            format!("record belongs to '{}'", record.id),
        ));
    }

    if record.is_legacy() {
        tracing::debug!(id, schema_version = record.schema_version, "read legacy install record");
    }

    Ok(record)
}
