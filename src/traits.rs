//! Core traits for dependency injection and testability
//!
//! The package manager only talks to the outside world through these seams:
//! - `Filesystem` for artifact copies and removals
//! - `ArchiveMounter` for disk-image attach/detach
//! - `InstallRegistry` for persisted install records
//! - `PlatformInstaller` for the per-OS placement policy, resolved once at startup
//!
//! Tests swap in counting or fault-injecting implementations without touching
//! real disk images or the system application directory.

use crate::error::Result;
use crate::platform::{ArtifactKind, PlaceRequest, Placement, RemoveRequest};
use crate::registry::types::InstallRecord;
use std::io;
use std::path::{Path, PathBuf};

/// Capability surface over the filesystem used for artifacts.
///
/// Every call completes before returning. Errors are raw `io::Error`s;
/// callers translate them into the matching `McpkgError` kind.
pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Copy a file or directory tree. An existing destination is removed
    /// first; the result is never a merge of old and new contents.
    fn copy_recursive(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn remove_recursive(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Entry names of a directory, sorted
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

/// Mounts disk-image archives so their contents can be copied out.
pub trait ArchiveMounter: Send + Sync {
    /// Attach the archive and return the mounted volume path
    fn mount(&self, archive: &Path) -> Result<PathBuf>;

    /// Entry names at the root of a mounted volume
    fn list_entries(&self, volume: &Path) -> Result<Vec<String>>;

    fn unmount(&self, volume: &Path) -> Result<()>;
}

/// Durable mapping from package id to its install record.
pub trait InstallRegistry: Send + Sync {
    /// `Ok(None)` when no record exists for `id`
    fn read(&self, id: &str) -> Result<Option<InstallRecord>>;

    /// Replace the record for `record.id` as a whole
    fn write(&self, record: &InstallRecord) -> Result<()>;

    /// Remove the record; a missing record is not an error
    fn delete(&self, id: &str) -> Result<()>;

    /// Ids of every stored record, sorted
    fn ids(&self) -> Result<Vec<String>>;
}

/// Per-OS placement policy.
pub trait PlatformInstaller: Send + Sync {
    /// Host platform name, as in `std::env::consts::OS`
    fn platform(&self) -> &'static str;

    fn classify(&self, source: &Path) -> ArtifactKind {
        ArtifactKind::from_path(source)
    }

    /// Put the artifact in its final location and report where it landed
    fn place(&self, fs: &dyn Filesystem, request: &PlaceRequest<'_>) -> Result<Placement>;

    /// Remove an installed artifact. Already-missing paths are a success.
    fn remove(&self, fs: &dyn Filesystem, request: &RemoveRequest<'_>) -> Result<()>;

    /// Whether `path` lies in a location this platform installs into,
    /// besides the manager's storage root
    fn owns_path(&self, _path: &Path) -> bool {
        false
    }
}
