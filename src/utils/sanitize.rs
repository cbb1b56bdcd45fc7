//! Input validation for caller-supplied package identifiers.
//!
//! Package ids become file and directory names under the storage root
//! (`<id>.json`, `<id>/`, `.locks/<id>.lock`), so anything that could
//! escape that directory is rejected up front.

use crate::error::{McpkgError, Result};
use crate::utils::paths;
use regex::Regex;
use std::sync::LazyLock;

const MAX_ID_LEN: usize = 128;

/// Allows: alphanumeric, dash, underscore, dot, plus, at sign. Must not start with a dot.
static SAFE_PACKAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9@_+-][a-zA-Z0-9@._+-]*$").expect("Invalid regex pattern"));

/// Validate a package id is usable as a registry key and file name
pub fn validate_package_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(McpkgError::InvalidInput(
            "Package id cannot be empty".to_string(),
        ));
    }

    if id.len() > MAX_ID_LEN {
        return Err(McpkgError::InvalidInput(format!(
            "Package id too long (max {} chars)",
            MAX_ID_LEN
        )));
    }

    if id.contains("..") {
        return Err(McpkgError::InvalidInput(format!(
            "Package id cannot contain path traversal: {}",
            id
        )));
    }

    if collides_with_record_file(id) {
        return Err(McpkgError::InvalidInput(format!(
            "Package id cannot end in '.{}': {}",
            paths::RECORD_EXTENSION,
            id
        )));
    }

    if !SAFE_PACKAGE_ID.is_match(id) {
        return Err(McpkgError::InvalidInput(format!(
            "Package id contains invalid characters: {}",
            id
        )));
    }

    Ok(())
}

// `<id>/` shares the storage root with `<id>.json` and `<id>.json.tmp`
fn collides_with_record_file(id: &str) -> bool {
    let lower = id.to_ascii_lowercase();
    let record_suffix = format!(".{}", paths::RECORD_EXTENSION);
    lower.ends_with(&record_suffix) || lower.ends_with(&format!("{}.tmp", record_suffix))
}

/// Reject empty required text options
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(McpkgError::InvalidInput(format!("'{}' is required", field)));
    }
    Ok(())
}
