//! Platform placement policy.
//!
//! One `PlatformInstaller` is chosen when the manager is built:
//! - macOS: bundles and disk images go to the applications directory
//! - everything else: generic files only, bundle classes are refused

pub mod generic;
pub mod macos;

use crate::config::Settings;
use crate::error::{McpkgError, Result};
use crate::mount::HdiutilMounter;
use crate::traits::{Filesystem, PlatformInstaller};
use crate::utils::paths;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use generic::GenericInstaller;
pub use macos::MacInstaller;

/// Artifact class, derived from the file extension (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Mountable container holding an application bundle (`.dmg`)
    DiskImage,
    /// Already-unpacked application bundle (`.app`)
    AppBundle,
    /// Anything else, stored as a single file
    File,
}

impl ArtifactKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("dmg") => ArtifactKind::DiskImage,
            Some(ext) if ext.eq_ignore_ascii_case("app") => ArtifactKind::AppBundle,
            _ => ArtifactKind::File,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::DiskImage => "Disk image",
            ArtifactKind::AppBundle => "Application bundle",
            ArtifactKind::File => "File",
        }
    }
}

/// Whether a file or directory name carries the application bundle suffix
pub fn is_bundle_name(name: &str) -> bool {
    ArtifactKind::from_path(Path::new(name)) == ArtifactKind::AppBundle
}

#[derive(Debug)]
pub struct PlaceRequest<'a> {
    pub id: &'a str,
    pub source: &'a Path,
    pub kind: ArtifactKind,
    /// Replaces `<storage_root>/<id>/` for generic files
    pub target_dir: Option<&'a Path>,
    pub storage_root: &'a Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub install_path: PathBuf,
    /// Non-fatal problems, e.g. a disk image that failed to detach
    pub warnings: Vec<String>,
}

impl Placement {
    pub fn at(install_path: PathBuf) -> Self {
        Self {
            install_path,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct RemoveRequest<'a> {
    pub id: &'a str,
    pub install_path: &'a Path,
    pub storage_root: &'a Path,
}

/// Pick the installer for the host OS
pub fn detect(settings: &Settings) -> Box<dyn PlatformInstaller> {
    for_os(std::env::consts::OS, settings)
}

pub fn for_os(os: &'static str, settings: &Settings) -> Box<dyn PlatformInstaller> {
    match os {
        "macos" => Box::new(MacInstaller::new(
            settings.applications_dir.clone(),
            Box::new(HdiutilMounter::new()),
        )),
        other => Box::new(GenericInstaller::new(other)),
    }
}

/// Copy a single file into `<storage_root>/<id>/` (or the explicit target dir)
pub(crate) fn place_generic_file(
    fs: &dyn Filesystem,
    request: &PlaceRequest<'_>,
) -> Result<Placement> {
    let file_name = request.source.file_name().ok_or_else(|| {
        McpkgError::InvalidInput(format!(
            "Source path has no file name: {}",
            request.source.display()
        ))
    })?;

    let dir = match request.target_dir {
        Some(dir) => dir.to_path_buf(),
        None => paths::package_dir(request.storage_root, request.id),
    };

    let created_dir = !fs.exists(&dir);
    if created_dir {
        fs.ensure_dir(&dir).map_err(|e| McpkgError::io(&dir, e))?;
    }

    let dest = dir.join(file_name);
    if let Err(e) = fs.copy_file(request.source, &dest) {
        if created_dir {
            let _ = remove_dir_if_empty(fs, &dir);
        }
        return Err(McpkgError::CopyFailed {
            from: request.source.to_path_buf(),
            to: dest,
            source: e,
        });
    }

    tracing::debug!(id = request.id, dest = %dest.display(), "copied package file");
    Ok(Placement::at(dest))
}

/// Copy a bundle directory into `dest_dir`, replacing any bundle of the same name
pub(crate) fn place_bundle(fs: &dyn Filesystem, bundle: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let bundle_name = bundle.file_name().ok_or_else(|| {
        McpkgError::InvalidInput(format!("Bundle path has no name: {}", bundle.display()))
    })?;
    let dest = dest_dir.join(bundle_name);

    let copy_err = |source: std::io::Error| McpkgError::CopyFailed {
        from: bundle.to_path_buf(),
        to: dest.clone(),
        source,
    };

    fs.ensure_dir(dest_dir).map_err(copy_err)?;
    fs.copy_recursive(bundle, &dest).map_err(copy_err)?;

    tracing::debug!(bundle = %bundle.display(), dest = %dest.display(), "copied application bundle");
    Ok(dest)
}

/// Remove one generic-file install, then its package dir once empty
pub(crate) fn remove_generic_file(fs: &dyn Filesystem, request: &RemoveRequest<'_>) -> Result<()> {
    match fs.remove_file(request.install_path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %request.install_path.display(), "artifact already absent");
        }
        Err(e) => {
            return Err(McpkgError::RemoveFailed {
                path: request.install_path.to_path_buf(),
                source: e,
            });
        }
    }

    let dir = paths::package_dir(request.storage_root, request.id);
    if fs.is_dir(&dir) {
        remove_dir_if_empty(fs, &dir)?;
    }
    Ok(())
}

/// Recursively remove an installed bundle; a missing bundle is fine
pub(crate) fn remove_tree(fs: &dyn Filesystem, path: &Path) -> Result<()> {
    match fs.remove_recursive(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "artifact already absent");
            Ok(())
        }
        Err(e) => Err(McpkgError::RemoveFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn remove_dir_if_empty(fs: &dyn Filesystem, dir: &Path) -> Result<()> {
    let remove_err = |source: std::io::Error| McpkgError::RemoveFailed {
        path: dir.to_path_buf(),
        source,
    };

    let entries = fs.list_dir(dir).map_err(remove_err)?;
    if !entries.is_empty() {
        return Ok(());
    }
    match fs.remove_recursive(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(remove_err(e)),
    }
}
