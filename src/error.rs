use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpkgError {
    /// Missing or malformed caller-supplied option
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to mount disk image '{}': {reason}", path.display())]
    MountFailed {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("No application bundle found in '{}'", volume.display())]
    NoBundleFound { volume: PathBuf },

    #[error("Failed to copy '{}' to '{}': {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{}': {source}", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{artifact} packages are not supported on {platform}")]
    UnsupportedPlatform {
        artifact: &'static str,
        platform: &'static str,
    },

    #[error("Install record for '{id}' is corrupt: {reason}")]
    CorruptRecord {
        id: String,
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Registry IO error at '{}': {source}", path.display())]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Per-package lock could not be taken
    #[error("Failed to lock package '{id}': {source}")]
    Lock {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stable, serializable discriminant of [`McpkgError`] for host responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    SourceNotFound,
    MountFailed,
    NoBundleFound,
    CopyFailed,
    RemoveFailed,
    UnsupportedPlatform,
    CorruptRecord,
    RegistryIo,
    Lock,
    Io,
    Path,
    Serialization,
}

impl McpkgError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            McpkgError::InvalidInput(_) => ErrorKind::InvalidInput,
            McpkgError::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            McpkgError::MountFailed { .. } => ErrorKind::MountFailed,
            McpkgError::NoBundleFound { .. } => ErrorKind::NoBundleFound,
            McpkgError::CopyFailed { .. } => ErrorKind::CopyFailed,
            McpkgError::RemoveFailed { .. } => ErrorKind::RemoveFailed,
            McpkgError::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            McpkgError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            McpkgError::RegistryIo { .. } => ErrorKind::RegistryIo,
            McpkgError::Lock { .. } => ErrorKind::Lock,
            McpkgError::Io { .. } => ErrorKind::Io,
            McpkgError::PathError(_) => ErrorKind::Path,
            McpkgError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        McpkgError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn registry_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        McpkgError::RegistryIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(id: &str, reason: impl Into<String>) -> Self {
        McpkgError::CorruptRecord {
            id: id.to_string(),
            reason: reason.into(),
            source: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, McpkgError>;
