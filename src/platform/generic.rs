use super::{ArtifactKind, PlaceRequest, Placement, RemoveRequest, place_generic_file, remove_generic_file};
use crate::error::{McpkgError, Result};
use crate::traits::{Filesystem, PlatformInstaller};

/// Platforms without a system application directory: every package is a
/// single file under the storage root. Bundle classes are refused rather
/// than silently stored as opaque files.
#[derive(Debug, Clone)]
pub struct GenericInstaller {
    platform: &'static str,
}

impl GenericInstaller {
    pub fn new(platform: &'static str) -> Self {
        Self { platform }
    }
}

impl PlatformInstaller for GenericInstaller {
    fn platform(&self) -> &'static str {
        self.platform
    }

    fn place(&self, fs: &dyn Filesystem, request: &PlaceRequest<'_>) -> Result<Placement> {
        match request.kind {
            ArtifactKind::File => place_generic_file(fs, request),
            kind @ (ArtifactKind::DiskImage | ArtifactKind::AppBundle) => {
                Err(McpkgError::UnsupportedPlatform {
                    artifact: kind.label(),
                    platform: self.platform,
                })
            }
        }
    }

    fn remove(&self, fs: &dyn Filesystem, request: &RemoveRequest<'_>) -> Result<()> {
        remove_generic_file(fs, request)
    }
}
