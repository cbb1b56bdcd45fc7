use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CURRENT_RECORD_SCHEMA_VERSION: u32 = 1;

/// Persisted install state for one package, stored as `<id>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRecord {
    /// Records written before versioning load as 0
    #[serde(default)]
    pub schema_version: u32,

    pub id: String,
    pub name: String,
    pub version: String,

    /// Installed artifact: bundle directory or copied file
    pub install_path: PathBuf,

    pub installed_at: DateTime<Utc>,
}

impl InstallRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        install_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            schema_version: CURRENT_RECORD_SCHEMA_VERSION,
            id: id.into(),
            name: name.into(),
            version: version.into(),
            install_path: install_path.into(),
            installed_at: Utc::now(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.schema_version < CURRENT_RECORD_SCHEMA_VERSION
    }
}
