//! Exclusion rules and entry-name computation.
//!
//! The rules are fixed: a dependency-cache directory is pruned from the walk,
//! and nested archives and environment files are left out. Nothing else is
//! filtered, so hidden files and directories such as `.platform/` are kept.

use crate::PackError;
use crate::Result;
use std::ffi::OsStr;
use std::path::Component;
use std::path::Path;

/// Directory name pruned from traversal, including everything below it.
pub const EXCLUDED_DIR_NAME: &str = "node_modules";

/// File suffix of archives that are never re-packed.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// File-name prefix of environment secret files.
pub const ENV_FILE_PREFIX: &str = ".env";

/// Returns `true` if a directory with this name must not be descended into.
///
/// Only an exact match counts: `node_modules_backup` is still walked.
///
/// # Examples
///
/// ```
/// use ebpack_core::filters;
/// use std::ffi::OsStr;
///
/// assert!(filters::is_excluded_dir(OsStr::new("node_modules")));
/// assert!(!filters::is_excluded_dir(OsStr::new(".platform")));
/// ```
#[must_use]
pub fn is_excluded_dir(name: &OsStr) -> bool {
    name == EXCLUDED_DIR_NAME
}

/// Returns `true` if a file with this name is left out of the archive.
///
/// # Examples
///
/// ```
/// use ebpack_core::filters;
/// use std::ffi::OsStr;
///
/// assert!(filters::is_excluded_file(OsStr::new("old.zip")));
/// assert!(filters::is_excluded_file(OsStr::new(".env.production")));
/// assert!(!filters::is_excluded_file(OsStr::new("app.py")));
/// assert!(!filters::is_excluded_file(OsStr::new("prod.env")));
/// ```
#[must_use]
pub fn is_excluded_file(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.ends_with(ARCHIVE_EXTENSION.as_bytes()) || bytes.starts_with(ENV_FILE_PREFIX.as_bytes())
}

/// Computes the archive entry name of `path` relative to `root`.
///
/// Components are joined with `/` regardless of the host separator, so the
/// archive extracts the same way everywhere.
///
/// # Errors
///
/// Returns `InvalidEntryPath` if:
/// - `path` is not under `root`
/// - `path` equals `root` (an empty name)
/// - a component is not valid UTF-8 or is not a plain name
///
/// # Examples
///
/// ```
/// use ebpack_core::filters;
/// use std::path::Path;
///
/// let name = filters::archive_name(Path::new("server/a/b/c.txt"), Path::new("server"))?;
/// assert_eq!(name, "a/b/c.txt");
/// # Ok::<(), ebpack_core::PackError>(())
/// ```
pub fn archive_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| invalid(path, format!("not under source root {}", root.display())))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| invalid(path, "name is not valid UTF-8".to_string()))?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return Err(invalid(path, "unexpected path component".to_string())),
        }
    }

    if parts.is_empty() {
        return Err(invalid(path, "empty entry name".to_string()));
    }

    Ok(parts.join("/"))
}

fn invalid(path: &Path, reason: String) -> PackError {
    PackError::InvalidEntryPath {
        path: path.to_path_buf(),
        reason,
    }
}
