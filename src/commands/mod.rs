pub mod completions;
pub mod info;
pub mod install;
pub mod list;
pub mod uninstall;

use crate::error::Result;
use serde::Serialize;

/// Print a host response as pretty JSON on stdout
pub(crate) fn emit_json<T: Serialize>(response: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(response)?;
    println!("{}", out);
    Ok(())
}
