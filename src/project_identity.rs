//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const BINARY_NAME: &str = "mcpkg";
pub const PROJECT_QUALIFIER: &str = "dev";
pub const PROJECT_ORG: &str = "mcpkg";
pub const ENV_PREFIX: &str = "MCPKG";

/// Directory under the user data dir holding records and generic installs.
pub const STORAGE_DIR_NAME: &str = "mcps";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn cli_with(args: &str) -> String {
    format!("{} {}", BINARY_NAME, args)
}
