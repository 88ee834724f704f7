//! Error types for packaging operations.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packaging a source directory.
///
/// Every variant is fatal to the run: there are no retries and no partial
/// success.
#[derive(Error, Debug)]
pub enum PackError {
    /// Source root does not exist.
    #[error("source directory not found: {}", path.display())]
    NotFound {
        /// The missing source root.
        path: PathBuf,
    },

    /// Source root exists but is not a directory.
    #[error("source is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending source root.
        path: PathBuf,
    },

    /// A file could not be read or the output could not be created.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path access was denied to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Any other read or write failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A path cannot be turned into a portable archive entry name.
    #[error("invalid entry path {}: {reason}", path.display())]
    InvalidEntryPath {
        /// The filesystem path.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level: {level} (must be 1-9)")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl PackError {
    /// Classifies an I/O error raised while touching `path`.
    ///
    /// `PermissionDenied` errors keep their own variant; everything else is
    /// reported as `Io`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebpack_core::PackError;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    /// let err = PackError::from_io(err, Path::new("server/secret.pem"));
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn from_io(source: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// Converts a `walkdir` traversal error.
    pub(crate) fn from_walk(err: walkdir::Error, root: &Path) -> Self {
        let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        Self::from_io(source, &path)
    }

    /// Converts an error raised by the ZIP writer.
    pub(crate) fn from_zip(err: zip::result::ZipError, path: &Path) -> Self {
        match err {
            zip::result::ZipError::Io(source) => Self::from_io(source, path),
            other => Self::Io {
                path: path.to_path_buf(),
                source: io::Error::other(other.to_string()),
            },
        }
    }

    /// Returns the path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. }
            | Self::InvalidEntryPath { path, .. } => Some(path),
            Self::InvalidCompressionLevel { .. } => None,
        }
    }

    /// Returns `true` if access to a file or the output was denied.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Stable machine-readable error code.
    ///
    /// # Examples
    ///
    /// ```
    /// use ebpack_core::PackError;
    /// use std::path::PathBuf;
    ///
    /// let err = PackError::NotFound {
    ///     path: PathBuf::from("server"),
    /// };
    /// assert_eq!(err.code(), "NOT_FOUND");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NotADirectory { .. } => "NOT_A_DIRECTORY",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::Io { .. } => "IO",
            Self::InvalidEntryPath { .. } => "INVALID_ENTRY_PATH",
            Self::InvalidCompressionLevel { .. } => "INVALID_COMPRESSION_LEVEL",
        }
    }
}
