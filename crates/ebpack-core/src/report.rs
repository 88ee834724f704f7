//! Packaging report and progress callbacks.

use std::time::Duration;

/// Report of a packaging run.
///
/// # Examples
///
/// ```
/// use ebpack_core::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of files added to the archive.
    pub files_added: usize,

    /// Number of files left out by the file-name rules.
    pub files_skipped: usize,

    /// Number of directories pruned from traversal.
    pub directories_pruned: usize,

    /// Total uncompressed bytes added.
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub bytes_compressed: u64,

    /// Entry names in archive order.
    pub entries: Vec<String>,

    /// Wall-clock duration of the run.
    pub duration: Duration,

    /// Non-fatal notes produced during the run.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage.
    ///
    /// Returns 0.0 when nothing was written. The archive container carries
    /// its own overhead, so tiny inputs can yield a negative value; it is
    /// clamped to 0.0.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        let saved = 1.0 - (self.bytes_compressed as f64 / self.bytes_written as f64);
        (saved * 100.0).max(0.0)
    }
}

/// Receives progress updates while the archive is written.
pub trait ProgressCallback {
    /// Called before an entry is added.
    ///
    /// # Arguments
    ///
    /// * `name` - Entry name inside the archive
    /// * `total` - Total number of entries to add
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called for each chunk of file data copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully written.
    fn on_entry_complete(&mut self, name: &str);

    /// Called once after the archive is finalized.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every update.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}
