//! Deployment bundle packaging.
//!
//! `ebpack-core` packs a source directory (by default `server/`) into a
//! deflate-compressed ZIP archive (by default `server-eb.zip`). Entry names
//! are relative to the source root and always use `/` separators. Three fixed
//! rules keep unwanted content out:
//!
//! - `node_modules/` directories are pruned from the walk
//! - `*.zip` files are skipped
//! - `.env*` files are skipped
//!
//! Hidden files and directories are otherwise kept, so `.platform/` and
//! `.ebextensions/` make it into the bundle.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = ebpack_core::pack("server", "server-eb.zip")?;
//! println!("Packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filters;
pub mod packager;
pub mod report;
pub mod walker;
pub mod writer;

pub use config::PackConfig;
pub use error::PackError;
pub use error::Result;
pub use packager::Packager;
pub use report::NoopProgress;
pub use report::PackReport;
pub use report::ProgressCallback;
pub use writer::pack;
pub use writer::pack_to_writer;
pub use writer::pack_with_config;
