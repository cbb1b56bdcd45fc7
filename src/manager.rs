//! Package lifecycle orchestration.
//!
//! install:   validate -> lock id -> classify -> place artifact -> confirm -> write record
//! uninstall: validate -> lock id -> cross-check record -> remove artifact -> delete record
//!
//! The record is always the last thing written and the last thing removed,
//! so a crash can leave at most a record whose artifact is already gone,
//! never a record pointing at something that was not written.

use crate::config::Settings;
use crate::error::{McpkgError, Result};
use crate::filesystem::LocalFilesystem;
use crate::platform::{self, PlaceRequest, RemoveRequest};
use crate::registry::{FsRegistry, IdLock, InstallRecord};
use crate::traits::{Filesystem, InstallRegistry, PlatformInstaller};
use crate::utils::paths;
use crate::utils::sanitize::{require_non_empty, validate_package_id};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Caller-supplied install request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallOptions {
    pub id: String,
    pub name: String,
    pub version: String,
    /// Downloaded artifact to install
    pub file_path: PathBuf,
    /// Directory for generic-file installs instead of `<storage_root>/<id>/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<PathBuf>,
}

/// Caller-supplied uninstall request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallOptions {
    pub id: String,
    /// Empty means "use the path from the install record"
    #[serde(default)]
    pub install_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstallOutcome {
    pub record: InstallRecord,
    pub warnings: Vec<String>,
}

impl InstallOutcome {
    pub fn install_path(&self) -> &Path {
        &self.record.install_path
    }
}

/// One entry of `list_installed`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    pub id: String,
    pub record: Option<InstallRecord>,
    /// Whether the recorded artifact is still on disk
    pub artifact_present: bool,
    /// Why the record could not be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

/// Installs, tracks and removes packages under one storage root.
///
/// Built once at startup and shared by reference; calls for different ids
/// run independently, calls for the same id are serialized by a lock file.
pub struct PackageManager {
    storage_root: PathBuf,
    fs: Box<dyn Filesystem>,
    platform: Box<dyn PlatformInstaller>,
    registry: Box<dyn InstallRegistry>,
}

impl PackageManager {
    /// Manager for the host platform using local disk
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        std::fs::create_dir_all(&settings.storage_root)
            .map_err(|e| McpkgError::io(&settings.storage_root, e))?;

        Ok(Self::with_parts(
            settings.storage_root.clone(),
            Box::new(LocalFilesystem),
            platform::detect(settings),
            Box::new(FsRegistry::new(&settings.storage_root)),
        ))
    }

    pub fn with_parts(
        storage_root: PathBuf,
        fs: Box<dyn Filesystem>,
        platform: Box<dyn PlatformInstaller>,
        registry: Box<dyn InstallRegistry>,
    ) -> Self {
        Self {
            storage_root,
            fs,
            platform,
            registry,
        }
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn platform(&self) -> &'static str {
        self.platform.platform()
    }

    pub fn install(&self, options: &InstallOptions) -> Result<InstallOutcome> {
        validate_package_id(&options.id)?;
        require_non_empty("name", &options.name)?;
        require_non_empty("version", &options.version)?;
        if options.file_path.as_os_str().is_empty() {
            return Err(McpkgError::InvalidInput("'filePath' is required".to_string()));
        }
        if let Some(target) = &options.target_path
            && !target.is_absolute()
        {
            return Err(McpkgError::InvalidInput(format!(
                "'targetPath' must be an absolute path: {}",
                target.display()
            )));
        }
        if !self.fs.exists(&options.file_path) {
            return Err(McpkgError::SourceNotFound {
                path: options.file_path.clone(),
            });
        }

        let kind = self.platform.classify(&options.file_path);
        let _lock = IdLock::acquire(&self.storage_root, &options.id)?;
        tracing::debug!(id = %options.id, kind = kind.label(), source = %options.file_path.display(), "installing package");

        let previous = match self.registry.read(&options.id) {
            Ok(record) => record,
            Err(e @ McpkgError::CorruptRecord { .. }) => {
                tracing::warn!(id = %options.id, error = %e, "replacing unreadable record");
                None
            }
            Err(e) => return Err(e),
        };

        let mut placement = self.platform.place(
            self.fs.as_ref(),
            &PlaceRequest {
                id: &options.id,
                source: &options.file_path,
                kind,
                target_dir: options.target_path.as_deref(),
                storage_root: &self.storage_root,
            },
        )?;

        if !self.fs.exists(&placement.install_path) {
            return Err(McpkgError::CopyFailed {
                from: options.file_path.clone(),
                to: placement.install_path,
                source: io::Error::new(io::ErrorKind::NotFound, "artifact missing after placement"),
            });
        }

        if let Some(previous) = previous
            && previous.install_path != placement.install_path
        {
            placement
                .warnings
                .extend(self.remove_replaced_artifact(&options.id, &previous.install_path));
        }

        let record = InstallRecord::new(
            &options.id,
            &options.name,
            &options.version,
            placement.install_path,
        );
        self.registry.write(&record)?;

        tracing::info!(
            id = %record.id,
            version = %record.version,
            path = %record.install_path.display(),
            "installed package"
        );
        Ok(InstallOutcome {
            record,
            warnings: placement.warnings,
        })
    }

    pub fn uninstall(&self, options: &UninstallOptions) -> Result<()> {
        validate_package_id(&options.id)?;
        let _lock = IdLock::acquire(&self.storage_root, &options.id)?;

        let record = match self.registry.read(&options.id) {
            Ok(record) => record,
            Err(e @ McpkgError::CorruptRecord { .. }) => {
                tracing::warn!(id = %options.id, error = %e, "ignoring unreadable record during uninstall");
                None
            }
            Err(e) => return Err(e),
        };

        let install_path = self.resolve_uninstall_path(options, record.as_ref())?;

        if let Some(path) = &install_path {
            self.platform.remove(
                self.fs.as_ref(),
                &RemoveRequest {
                    id: &options.id,
                    install_path: path,
                    storage_root: &self.storage_root,
                },
            )?;
        }

        self.registry.delete(&options.id)?;

        tracing::info!(id = %options.id, path = ?install_path, "uninstalled package");
        Ok(())
    }

    /// Read the install record; `Ok(None)` when the package is not installed
    pub fn get_install_info(&self, id: &str) -> Result<Option<InstallRecord>> {
        validate_package_id(id)?;
        self.registry.read(id)
    }

    /// Every recorded package, with an existence check of its artifact
    pub fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        let mut packages = Vec::new();
        for id in self.registry.ids()? {
            let entry = match self.registry.read(&id) {
                Ok(Some(record)) => {
                    let artifact_present = self.fs.exists(&record.install_path);
                    if !artifact_present {
                        tracing::warn!(id = %id, path = %record.install_path.display(), "installed artifact is missing");
                    }
                    InstalledPackage {
                        id,
                        record: Some(record),
                        artifact_present,
                        problem: None,
                    }
                }
                Ok(None) => continue,
                Err(e) => InstalledPackage {
                    id,
                    record: None,
                    artifact_present: false,
                    problem: Some(e.to_string()),
                },
            };
            packages.push(entry);
        }
        Ok(packages)
    }

    /// Drop the artifact of the record being replaced; failures become warnings
    fn remove_replaced_artifact(&self, id: &str, old_path: &Path) -> Option<String> {
        let removed = self.platform.remove(
            self.fs.as_ref(),
            &RemoveRequest {
                id,
                install_path: old_path,
                storage_root: &self.storage_root,
            },
        );
        match removed {
            Ok(()) => {
                tracing::debug!(id, path = %old_path.display(), "removed replaced artifact");
                None
            }
            Err(e) => {
                tracing::warn!(id, path = %old_path.display(), error = %e, "failed to remove replaced artifact");
                Some(format!(
                    "Previous artifact '{}' could not be removed: {}",
                    old_path.display(),
                    e
                ))
            }
        }
    }

    fn resolve_uninstall_path(
        &self,
        options: &UninstallOptions,
        record: Option<&InstallRecord>,
    ) -> Result<Option<PathBuf>> {
        let requested = &options.install_path;

        if requested.as_os_str().is_empty() {
            return Ok(record.map(|r| r.install_path.clone()));
        }

        if requested.components().any(|c| c == Component::ParentDir) {
            return Err(McpkgError::InvalidInput(format!(
                "Install path must not contain '..': {}",
                requested.display()
            )));
        }

        match record {
            Some(record) if record.install_path != *requested => {
                Err(McpkgError::InvalidInput(format!(
                    "Install path '{}' does not match the recorded path '{}' for '{}'",
                    requested.display(),
                    record.install_path.display(),
                    options.id
                )))
            }
            Some(_) => Ok(Some(requested.clone())),
            None if requested.starts_with(paths::package_dir(&self.storage_root, &options.id))
                || self.platform.owns_path(requested) =>
            {
                Ok(Some(requested.clone()))
            }
            None => Err(McpkgError::InvalidInput(format!(
                "Refusing to remove '{}': no install record for '{}' and the path is outside managed locations",
                requested.display(),
                options.id
            ))),
        }
    }
}
