//! Settings Module
//!
//! Resolves where the manager keeps its records and where bundles are placed.
//! Precedence: explicit override (CLI flag) > environment variable > platform default.

use crate::error::{McpkgError, Result};
use crate::project_identity;
use crate::utils::paths;
use std::path::{Path, PathBuf};

pub const DEFAULT_APPLICATIONS_DIR: &str = "/Applications";

const STORAGE_ROOT_ENV: &str = "STORAGE_ROOT";
const APPLICATIONS_DIR_ENV: &str = "APPLICATIONS_DIR";

/// Resolved manager settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Private directory for records and generic-file installs
    pub storage_root: PathBuf,
    /// System application directory for bundles (macOS only)
    pub applications_dir: PathBuf,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub storage_root: Option<PathBuf>,
    pub applications_dir: Option<PathBuf>,
}

impl Settings {
    pub fn new(storage_root: impl Into<PathBuf>, applications_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            applications_dir: applications_dir.into(),
        }
    }

    /// Resolve settings from overrides and the process environment
    pub fn resolve(overrides: &SettingsOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    fn resolve_with<F>(overrides: &SettingsOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_root = match pick(&overrides.storage_root, &env, STORAGE_ROOT_ENV) {
            Some(path) => paths::expand_home(&path)?,
            None => paths::default_storage_root()?,
        };

        let applications_dir = match pick(&overrides.applications_dir, &env, APPLICATIONS_DIR_ENV) {
            Some(path) => {
                let dir = paths::expand_home(&path)?;
                if !dir.is_absolute() {
                    return Err(McpkgError::PathError(format!(
                        "The applications directory must be an absolute path: {}",
                        dir.display()
                    )));
                }
                dir
            }
            None => PathBuf::from(DEFAULT_APPLICATIONS_DIR),
        };

        let settings = Self {
            storage_root,
            applications_dir,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.storage_root.is_absolute() {
            return Err(McpkgError::PathError(format!(
                "The storage root must be an absolute path: {}",
                self.storage_root.display()
            )));
        }
        Ok(())
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }
}

fn pick<F>(explicit: &Option<PathBuf>, env: &F, suffix: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = explicit {
        return Some(path.clone());
    }
    env(&project_identity::env_key(suffix))
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests;
