//! Disk-image mounting.
//!
//! `HdiutilMounter` drives macOS `hdiutil`, which has no native binding.
//! `MountedVolume` scopes a mount to one install call: the volume is
//! detached on every exit path, including early returns and panics.

use crate::error::{McpkgError, Result};
use crate::traits::ArchiveMounter;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

const HDIUTIL: &str = "hdiutil";

/// Mount points reported by `hdiutil attach`, e.g. `/dev/disk4s1\tApple_HFS\t/Volumes/Tool`
static VOLUME_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(/Volumes/[^\t\r\n]+)").expect("Invalid regex pattern"));

/// Extract the mounted volume path from `hdiutil attach` output
pub fn parse_volume_path(stdout: &str) -> Option<PathBuf> {
    VOLUME_PATH
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| PathBuf::from(m.as_str().trim_end()))
}

/// `ArchiveMounter` backed by the `hdiutil` command line tool
#[derive(Debug, Default, Clone)]
pub struct HdiutilMounter;

impl HdiutilMounter {
    pub fn new() -> Self {
        Self
    }

    fn binary(&self, archive: &Path) -> Result<PathBuf> {
        which::which(HDIUTIL).map_err(|e| McpkgError::MountFailed {
            path: archive.to_path_buf(),
            reason: format!("'{}' is not available: {}", HDIUTIL, e),
            source: None,
        })
    }
}

impl ArchiveMounter for HdiutilMounter {
    fn mount(&self, archive: &Path) -> Result<PathBuf> {
        let hdiutil = self.binary(archive)?;
        let output = Command::new(hdiutil)
            .arg("attach")
            .arg("-nobrowse")
            .arg(archive)
            .output()
            .map_err(|e| McpkgError::MountFailed {
                path: archive.to_path_buf(),
                reason: "could not run hdiutil".to_string(),
                source: Some(e),
            })?;

        if !output.status.success() {
            return Err(McpkgError::MountFailed {
                path: archive.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                source: None,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_volume_path(&stdout).ok_or_else(|| McpkgError::MountFailed {
            path: archive.to_path_buf(),
            reason: "could not find mounted volume".to_string(),
            source: None,
        })
    }

    fn list_entries(&self, volume: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(volume).map_err(|e| McpkgError::io(volume, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| McpkgError::io(volume, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn unmount(&self, volume: &Path) -> Result<()> {
        let hdiutil = self.binary(volume)?;
        let output = Command::new(hdiutil)
            .arg("detach")
            .arg(volume)
            .output()
            .map_err(|e| McpkgError::io(volume, e))?;

        if !output.status.success() {
            return Err(McpkgError::io(
                volume,
                std::io::Error::other(String::from_utf8_lossy(&output.stderr).trim().to_string()),
            ));
        }
        Ok(())
    }
}

/// A mounted volume that is detached when released or dropped.
pub struct MountedVolume<'a> {
    mounter: &'a dyn ArchiveMounter,
    path: PathBuf,
    mounted: bool,
}

impl<'a> MountedVolume<'a> {
    pub fn mount(mounter: &'a dyn ArchiveMounter, archive: &Path) -> Result<Self> {
        let path = mounter.mount(archive)?;
        tracing::debug!(archive = %archive.display(), volume = %path.display(), "mounted disk image");
        Ok(Self {
            mounter,
            path,
            mounted: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detach now. A failure is logged and handed back as a warning message;
    /// it never replaces the outcome of the surrounding operation.
    pub fn release(mut self) -> Option<String> {
        self.mounted = false;
        self.detach()
    }

    fn detach(&self) -> Option<String> {
        match self.mounter.unmount(&self.path) {
            Ok(()) => {
                tracing::debug!(volume = %self.path.display(), "unmounted disk image");
                None
            }
            Err(e) => {
                tracing::warn!(volume = %self.path.display(), error = %e, "failed to unmount disk image");
                Some(format!(
                    "Failed to unmount '{}': {}",
                    self.path.display(),
                    e
                ))
            }
        }
    }
}

impl Drop for MountedVolume<'_> {
    fn drop(&mut self) {
        if self.mounted {
            self.mounted = false;
            let _ = self.detach();
        }
    }
}
