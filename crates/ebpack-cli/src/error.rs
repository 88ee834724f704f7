//! Error conversion utilities for CLI.
//!
//! Converts ebpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance. The original
//! `PackError` stays in the chain so callers can still downcast to it.

use ebpack_core::PackError;
use std::path::Path;

/// Converts `PackError` to a user-friendly anyhow error with context.
pub fn convert_pack_error(err: PackError, output: &Path) -> anyhow::Error {
    let message = match &err {
        PackError::NotFound { path } => format!(
            "Source directory '{}' not found\n\
             HINT: Run from the folder that contains it, or pass --source <DIR>.",
            path.display()
        ),
        PackError::NotADirectory { path } => format!(
            "Source '{}' is not a directory\n\
             HINT: --source must point at the folder to package.",
            path.display()
        ),
        PackError::PermissionDenied { path, .. } => format!(
            "Permission denied: '{}'\n\
             HINT: Check read access on the source tree and write access to '{}'.",
            path.display(),
            output.display()
        ),
        PackError::Io { path, source } => {
            format!("I/O error while packaging '{}': {source}", path.display())
        }
        PackError::InvalidEntryPath { path, reason } => format!(
            "Cannot archive '{}': {reason}\n\
             HINT: Rename the file so its name is valid UTF-8.",
            path.display()
        ),
        PackError::InvalidCompressionLevel { level } => format!(
            "Invalid compression level {level}\n\
             HINT: Use a value from 1 (fastest) to 9 (smallest)."
        ),
    };
    anyhow::Error::new(err).context(message)
}

/// Adds CLI context to a packaging result.
pub fn add_pack_context<T>(
    result: Result<T, PackError>,
    output: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, output))
}

/// Returns the machine-readable code of the underlying `PackError`, if any.
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    error.downcast_ref::<PackError>().map(PackError::code)
}
