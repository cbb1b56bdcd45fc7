//! Host-facing request/response surface.
//!
//! Every call returns a response value with `success` set instead of an
//! `Err`, so hosts that speak JSON get a stable shape for both outcomes.

use crate::error::{ErrorKind, McpkgError};
use crate::manager::{InstallOptions, InstalledPackage, PackageManager, UninstallOptions};
use crate::registry::InstallRecord;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_path: Option<PathBuf>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub success: bool,
    /// `null` when the package is not installed
    pub record: Option<InstallRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    pub packages: Vec<InstalledPackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

fn failure(op: &str, e: &McpkgError) -> (Option<String>, Option<ErrorKind>) {
    tracing::error!(op, kind = ?e.kind(), error = %e, "operation failed");
    (Some(e.to_string()), Some(e.kind()))
}

/// Adapter between a host and one [`PackageManager`]
pub struct McpHost {
    manager: PackageManager,
}

impl McpHost {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &PackageManager {
        &self.manager
    }

    pub fn install(&self, options: &InstallOptions) -> InstallResponse {
        match self.manager.install(options) {
            Ok(outcome) => InstallResponse {
                success: true,
                install_path: Some(outcome.record.install_path),
                warnings: outcome.warnings,
                error: None,
                error_kind: None,
            },
            Err(e) => {
                let (error, error_kind) = failure("install", &e);
                InstallResponse {
                    success: false,
                    install_path: None,
                    warnings: Vec::new(),
                    error,
                    error_kind,
                }
            }
        }
    }

    pub fn uninstall(&self, options: &UninstallOptions) -> UninstallResponse {
        match self.manager.uninstall(options) {
            Ok(()) => UninstallResponse {
                success: true,
                error: None,
                error_kind: None,
            },
            Err(e) => {
                let (error, error_kind) = failure("uninstall", &e);
                UninstallResponse {
                    success: false,
                    error,
                    error_kind,
                }
            }
        }
    }

    pub fn get_install_info(&self, id: &str) -> InfoResponse {
        match self.manager.get_install_info(id) {
            Ok(record) => InfoResponse {
                success: true,
                record,
                error: None,
                error_kind: None,
            },
            Err(e) => {
                let (error, error_kind) = failure("info", &e);
                InfoResponse {
                    success: false,
                    record: None,
                    error,
                    error_kind,
                }
            }
        }
    }

    pub fn list(&self) -> ListResponse {
        match self.manager.list_installed() {
            Ok(packages) => ListResponse {
                success: true,
                packages,
                error: None,
                error_kind: None,
            },
            Err(e) => {
                let (error, error_kind) = failure("list", &e);
                ListResponse {
                    success: false,
                    packages: Vec::new(),
                    error,
                    error_kind,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
