//! ZIP archive writing.
//!
//! Files are appended in walk order, one fully before the next is visited.
//! The archive is owned by a single `ZipWriter` for the whole run. On the
//! success path it is finished and flushed explicitly; on any error path the
//! writer is dropped, which still writes the central directory and closes the
//! file. A failed run may therefore leave an incomplete but readable archive.

use crate::PackConfig;
use crate::PackError;
use crate::Result;
use crate::report::NoopProgress;
use crate::report::PackReport;
use crate::report::ProgressCallback;
use crate::walker;
use crate::walker::SourceFile;
use crate::walker::SourceWalker;
use crate::walker::WalkEvent;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use time::OffsetDateTime;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Entries at or above this size need ZIP64 headers.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Packages `source_root` into a deflate ZIP at `output`.
///
/// Any existing file at `output` is overwritten. The source root is checked
/// before the output is created, so a missing source never leaves an empty
/// archive behind.
///
/// # Examples
///
/// ```no_run
/// let report = ebpack_core::pack("server", "server-eb.zip")?;
/// println!("added {} files", report.files_added);
/// # Ok::<(), ebpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// - `NotFound` / `NotADirectory` if the source root is unusable
/// - `PermissionDenied` if a file cannot be read or the output cannot be
///   created
/// - `Io` for any other read or write failure
pub fn pack<P: AsRef<Path>, Q: AsRef<Path>>(source_root: P, output: Q) -> Result<PackReport> {
    let config = PackConfig::default()
        .with_source_root(source_root.as_ref())
        .with_output_path(output.as_ref());
    pack_with_config(&config, &mut NoopProgress)
}

/// Packages according to `config`, reporting progress as entries are written.
///
/// # Errors
///
/// Same as [`pack`], plus `InvalidCompressionLevel` for a bad configuration.
pub fn pack_with_config(
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    config.validate()?;
    let start = Instant::now();
    let root = config.source_root.as_path();
    let output = config.output_path.as_path();

    walker::validate_source_root(root)?;

    let file = File::create(output).map_err(|e| PackError::from_io(e, output))?;
    debug!(output = %output.display(), "created output archive");
    let own_output = canonical_output_inside(root, output);

    let writer = BufWriter::new(file);
    let (writer, mut report) =
        write_archive(writer, root, output, own_output.as_deref(), config, progress)?;
    writer
        .into_inner()
        .map_err(|e| PackError::from_io(e.into_error(), output))?;

    report.bytes_compressed = fs::metadata(output)
        .map_err(|e| PackError::from_io(e, output))?
        .len();
    report.duration = start.elapsed();

    info!(
        output = %output.display(),
        files = report.files_added,
        skipped = report.files_skipped,
        pruned = report.directories_pruned,
        bytes = report.bytes_written,
        "archive written"
    );

    Ok(report)
}

/// Packages `source_root` into any seekable writer and returns it finished.
///
/// `bytes_compressed` is left at 0; the caller owns the sink and knows its
/// size.
///
/// # Errors
///
/// Same as [`pack_with_config`]. Write failures are reported against the
/// path `<archive>`.
///
/// # Examples
///
/// ```no_run
/// use ebpack_core::PackConfig;
/// use ebpack_core::NoopProgress;
/// use std::io::Cursor;
///
/// let config = PackConfig::default();
/// let (cursor, report) =
///     ebpack_core::pack_to_writer(Cursor::new(Vec::new()), &config, &mut NoopProgress)?;
/// println!("{} bytes, {} files", cursor.get_ref().len(), report.files_added);
/// # Ok::<(), ebpack_core::PackError>(())
/// ```
pub fn pack_to_writer<W: Write + Seek>(
    writer: W,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<(W, PackReport)> {
    config.validate()?;
    let start = Instant::now();
    let root = config.source_root.as_path();
    walker::validate_source_root(root)?;

    let (writer, mut report) =
        write_archive(writer, root, Path::new("<archive>"), None, config, progress)?;
    report.duration = start.elapsed();
    Ok((writer, report))
}

/// Walks `root` and appends each qualifying file as soon as it is visited.
fn write_archive<W: Write + Seek>(
    writer: W,
    root: &Path,
    output: &Path,
    own_output: Option<&Path>,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<(W, PackReport)> {
    let source = SourceWalker::new(root);
    let total = source.count_candidates();
    let options = base_options(config);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut zip = ZipWriter::new(writer);
    let mut report = PackReport::default();

    for event in source.walk() {
        let file = match event? {
            WalkEvent::File(file) => file,
            WalkEvent::SkippedFile(_) => {
                report.files_skipped += 1;
                continue;
            }
            WalkEvent::PrunedDir(_) => {
                report.directories_pruned += 1;
                continue;
            }
        };

        if own_output.is_some_and(|own| fs::canonicalize(&file.path).is_ok_and(|p| p == own)) {
            report.add_warning(format!(
                "Skipped the output archive itself: {}",
                file.path.display()
            ));
            continue;
        }

        progress.on_entry_start(&file.archive_name, total, report.files_added + 1);
        let written = add_file(&mut zip, &file, output, options, config, progress, &mut buffer)?;
        progress.on_entry_complete(&file.archive_name);

        debug!(entry = %file.archive_name, bytes = written, "added entry");
        report.files_added += 1;
        report.bytes_written += written;
        report.entries.push(file.archive_name);
    }

    let writer = zip.finish().map_err(|e| PackError::from_zip(e, output))?;
    progress.on_complete();

    Ok((writer, report))
}

fn base_options(config: &PackConfig) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    match config.compression_level {
        Some(level) => options.compression_level(Some(i64::from(level))),
        None => options,
    }
}

/// Copies one file into the archive and returns the bytes read.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    file: &SourceFile,
    output: &Path,
    options: SimpleFileOptions,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut source = File::open(&file.path).map_err(|e| PackError::from_io(e, &file.path))?;
    let metadata = source
        .metadata()
        .map_err(|e| PackError::from_io(e, &file.path))?;

    let mut options = options
        .large_file(metadata.len() >= ZIP64_THRESHOLD)
        .last_modified_time(entry_time(&metadata));
    if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(metadata.permissions().mode());
        }
    }

    zip.start_file(file.archive_name.as_str(), options)
        .map_err(|e| PackError::from_zip(e, output))?;

    let mut written = 0u64;
    loop {
        let n = source
            .read(buffer)
            .map_err(|e| PackError::from_io(e, &file.path))?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])
            .map_err(|e| PackError::from_io(e, output))?;
        written += n as u64;
        progress.on_bytes_written(n as u64);
    }

    Ok(written)
}

/// Modification time of a source file as a ZIP timestamp, in UTC.
///
/// Times the DOS format cannot hold (before 1980 or after 2107) fall back to
/// the format's minimum.
fn entry_time(metadata: &fs::Metadata) -> DateTime {
    metadata
        .modified()
        .ok()
        .and_then(|modified| {
            let t = OffsetDateTime::from(modified);
            DateTime::from_date_and_time(
                u16::try_from(t.year()).ok()?,
                u8::from(t.month()),
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
            )
            .ok()
        })
        .unwrap_or_default()
}

/// Canonical output path, when the output lives under the source root.
fn canonical_output_inside(root: &Path, output: &Path) -> Option<PathBuf> {
    let root = fs::canonicalize(root).ok()?;
    let output = fs::canonicalize(output).ok()?;
    output.starts_with(&root).then_some(output)
}
