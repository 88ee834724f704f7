//! Builder for packaging runs with a fluent API.

use std::path::Path;

use crate::config::PackConfig;
use crate::error::Result;
use crate::report::NoopProgress;
use crate::report::PackReport;
use crate::report::ProgressCallback;

/// Builder for packaging runs.
///
/// Starts from [`PackConfig::default`], so an unconfigured `Packager` packs
/// `server/` into `server-eb.zip`.
///
/// # Examples
///
/// ```no_run
/// use ebpack_core::Packager;
///
/// let report = Packager::new()
///     .source("api")
///     .output("dist/api-eb.zip")
///     .compression_level(9)
///     .create()?;
///
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), ebpack_core::PackError>(())
/// ```
#[derive(Debug, Default)]
pub struct Packager {
    config: PackConfig,
}

impl Packager {
    /// Creates a new `Packager` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory to package.
    #[must_use]
    pub fn source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.source_root = path.as_ref().to_path_buf();
        self
    }

    /// Sets the output archive path.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the compression level (1-9).
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = Some(level);
        self
    }

    /// Sets whether unix permission bits are stored.
    #[must_use]
    pub fn preserve_permissions(mut self, preserve: bool) -> Self {
        self.config.preserve_permissions = preserve;
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the packaging.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or packaging fails.
    pub fn create(self) -> Result<PackReport> {
        self.create_with_progress(&mut NoopProgress)
    }

    /// Runs the packaging with progress reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or packaging fails.
    pub fn create_with_progress(self, progress: &mut dyn ProgressCallback) -> Result<PackReport> {
        crate::writer::pack_with_config(&self.config, progress)
    }
}
