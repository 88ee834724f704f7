//! Source tree traversal with the fixed exclusion rules applied.
//!
//! The walk is top-down and sorted by file name so that two runs over the
//! same tree produce entries in the same order. Excluded directories are
//! pruned before descent: nothing below them is ever visited.

use crate::PackError;
use crate::Result;
use crate::filters;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// A file that qualifies for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Filesystem path of the file (or of the symlink pointing at it).
    pub path: PathBuf,

    /// Entry name inside the archive: relative, `/`-separated.
    pub archive_name: String,

    /// Size in bytes as reported when the file was visited.
    pub size: u64,
}

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// A file to add to the archive.
    File(SourceFile),

    /// A file rejected by the file-name rules.
    SkippedFile(PathBuf),

    /// A directory pruned from traversal.
    PrunedDir(PathBuf),
}

/// Checks that the source root exists and is a directory.
///
/// Run this before creating the output so a bad source never leaves an
/// empty archive behind.
///
/// # Errors
///
/// - `NotFound` if the root does not exist
/// - `NotADirectory` if it is not a directory
/// - `PermissionDenied` / `Io` if its metadata cannot be read
pub fn validate_source_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(PackError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PackError::NotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(PackError::from_io(e, root)),
    }
}

/// Walks a source root and yields [`WalkEvent`]s.
///
/// # Examples
///
/// ```no_run
/// use ebpack_core::walker::SourceWalker;
/// use ebpack_core::walker::WalkEvent;
/// use std::path::Path;
///
/// for event in SourceWalker::new(Path::new("server")).walk() {
///     if let WalkEvent::File(file) = event? {
///         println!("would add {}", file.archive_name);
///     }
/// }
/// # Ok::<(), ebpack_core::PackError>(())
/// ```
pub struct SourceWalker<'a> {
    root: &'a Path,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Returns an iterator over walk events.
    ///
    /// Symlinks are not followed during descent. A symlink to a regular file
    /// is treated as that file; a symlink to a directory yields nothing.
    ///
    /// # Errors
    ///
    /// Items are errors when a directory cannot be listed, a file's metadata
    /// cannot be read (including dangling symlinks), or a name cannot become
    /// an entry name.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEvent>> + 'a {
        let root = self.root;
        let mut it = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        std::iter::from_fn(move || {
            loop {
                let entry = match it.next()? {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(PackError::from_walk(e, root))),
                };

                // The root is never filtered, whatever its name.
                if entry.depth() == 0 {
                    continue;
                }

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    if filters::is_excluded_dir(entry.file_name()) {
                        debug!(path = %entry.path().display(), "pruning directory");
                        it.skip_current_dir();
                        return Some(Ok(WalkEvent::PrunedDir(entry.into_path())));
                    }
                    continue;
                }

                if let Some(event) = classify_file(&entry, root).transpose() {
                    return Some(event);
                }
            }
        })
    }

    /// Counts the files that pass the name rules, reading no metadata.
    ///
    /// Symlinks and special files are counted as well, so this is an upper
    /// bound on what [`walk`](Self::walk) yields. Unreadable directories are
    /// ignored here; the real walk reports them.
    #[must_use]
    pub fn count_candidates(&self) -> usize {
        WalkDir::new(self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !(entry.file_type().is_dir() && filters::is_excluded_dir(entry.file_name()))
            })
            .filter_map(std::result::Result::ok)
            .filter(|entry| {
                !entry.file_type().is_dir() && !filters::is_excluded_file(entry.file_name())
            })
            .count()
    }
}

/// Decides what a non-directory entry contributes to the archive.
fn classify_file(entry: &walkdir::DirEntry, root: &Path) -> Result<Option<WalkEvent>> {
    let path = entry.path();

    let metadata = if entry.file_type().is_symlink() {
        match fs::metadata(path) {
            Ok(target) if target.is_dir() => {
                debug!(path = %path.display(), "not descending into symlinked directory");
                return Ok(None);
            }
            Ok(target) => Some(target),
            // Dangling: only an error if the name would have qualified.
            Err(e) if !filters::is_excluded_file(entry.file_name()) => {
                return Err(PackError::from_io(e, path));
            }
            Err(_) => None,
        }
    } else {
        None
    };

    if filters::is_excluded_file(entry.file_name()) {
        debug!(path = %path.display(), "skipping excluded file");
        return Ok(Some(WalkEvent::SkippedFile(path.to_path_buf())));
    }

    let metadata = match metadata {
        Some(metadata) => metadata,
        None => entry
            .metadata()
            .map_err(|e| PackError::from_walk(e, root))?,
    };

    if !metadata.is_file() {
        debug!(path = %path.display(), "skipping special file");
        return Ok(None);
    }

    let archive_name = filters::archive_name(path, root)?;
    Ok(Some(WalkEvent::File(SourceFile {
        path: path.to_path_buf(),
        archive_name,
        size: metadata.len(),
    })))
}
