//! Configuration for packaging operations.

use crate::PackError;
use crate::Result;
use std::path::PathBuf;

/// Default directory packaged when none is given.
pub const DEFAULT_SOURCE_ROOT: &str = "server";

/// Default archive written to the current working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "server-eb.zip";

/// Default deflate level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for a packaging run.
///
/// The exclusion rules are fixed (see [`crate::filters`]) and are not part of
/// the configuration.
///
/// # Examples
///
/// ```
/// use ebpack_core::PackConfig;
///
/// let config = PackConfig::default()
///     .with_source_root("api")
///     .with_output_path("api-eb.zip")
///     .with_compression_level(9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Directory whose contents are archived.
    ///
    /// Default: `server`.
    pub source_root: PathBuf,

    /// Archive file to create or overwrite.
    ///
    /// Default: `server-eb.zip`.
    pub output_path: PathBuf,

    /// Deflate level (1-9). `None` uses the deflate default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Store unix permission bits on each entry.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            preserve_permissions: true,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source root.
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// Sets the output archive path.
    #[must_use]
    pub fn with_output_path(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_path = output.into();
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are accepted here and rejected by `validate()`.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to store unix permission bits.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCompressionLevel` if a level is set outside 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(PackError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_config_default() {
        let config = PackConfig::default();
        assert_eq!(config.source_root, PathBuf::from("server"));
        assert_eq!(config.output_path, PathBuf::from("server-eb.zip"));
        assert_eq!(config.compression_level, Some(6));
        assert!(config.preserve_permissions);
    }

    #[test]
    fn test_pack_config_builder() {
        let config = PackConfig::new()
            .with_source_root("api")
            .with_output_path("dist/api.zip")
            .with_compression_level(1)
            .with_preserve_permissions(false);

        assert_eq!(config.source_root, PathBuf::from("api"));
        assert_eq!(config.output_path, PathBuf::from("dist/api.zip"));
        assert_eq!(config.compression_level, Some(1));
        assert!(!config.preserve_permissions);
    }

    #[test]
    fn test_validate_accepts_range_and_none() {
        for level in 1..=9 {
            assert!(PackConfig::default().with_compression_level(level).validate().is_ok());
        }
        let config = PackConfig {
            compression_level: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for level in [0, 10, 255] {
            let err = PackConfig::default()
                .with_compression_level(level)
                .validate()
                .unwrap_err();
            assert!(matches!(err, PackError::InvalidCompressionLevel { level: l } if l == level));
        }
    }
}
