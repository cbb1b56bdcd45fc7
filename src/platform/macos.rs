use super::{
    ArtifactKind, PlaceRequest, Placement, RemoveRequest, is_bundle_name, place_bundle,
    place_generic_file, remove_generic_file, remove_tree,
};
use crate::error::{McpkgError, Result};
use crate::mount::MountedVolume;
use crate::traits::{ArchiveMounter, Filesystem, PlatformInstaller};
use std::path::{Path, PathBuf};

/// Installs `.app` bundles and `.dmg` images into the applications directory
pub struct MacInstaller {
    applications_dir: PathBuf,
    mounter: Box<dyn ArchiveMounter>,
}

impl MacInstaller {
    pub fn new(applications_dir: PathBuf, mounter: Box<dyn ArchiveMounter>) -> Self {
        Self {
            applications_dir,
            mounter,
        }
    }

    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }

    fn place_from_disk_image(&self, fs: &dyn Filesystem, image: &Path) -> Result<Placement> {
        let volume = MountedVolume::mount(self.mounter.as_ref(), image)?;
        let placed = self.copy_bundle_from_volume(fs, volume.path());
        let unmount_warning = volume.release();

        let mut placement = Placement::at(placed?);
        placement.warnings.extend(unmount_warning);
        Ok(placement)
    }

    fn copy_bundle_from_volume(&self, fs: &dyn Filesystem, volume: &Path) -> Result<PathBuf> {
        let entries = self.mounter.list_entries(volume)?;
        let bundle = entries
            .iter()
            .find(|name| is_bundle_name(name))
            .ok_or_else(|| McpkgError::NoBundleFound {
                volume: volume.to_path_buf(),
            })?;

        place_bundle(fs, &volume.join(bundle), &self.applications_dir)
    }
}

impl PlatformInstaller for MacInstaller {
    fn platform(&self) -> &'static str {
        "macos"
    }

    fn place(&self, fs: &dyn Filesystem, request: &PlaceRequest<'_>) -> Result<Placement> {
        match request.kind {
            ArtifactKind::DiskImage => self.place_from_disk_image(fs, request.source),
            ArtifactKind::AppBundle => {
                place_bundle(fs, request.source, &self.applications_dir).map(Placement::at)
            }
            ArtifactKind::File => place_generic_file(fs, request),
        }
    }

    fn remove(&self, fs: &dyn Filesystem, request: &RemoveRequest<'_>) -> Result<()> {
        let path = request.install_path;
        let is_installed_bundle = path.starts_with(&self.applications_dir)
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_bundle_name);

        if is_installed_bundle {
            remove_tree(fs, path)
        } else {
            remove_generic_file(fs, request)
        }
    }

    fn owns_path(&self, path: &Path) -> bool {
        path.starts_with(&self.applications_dir)
    }
}
