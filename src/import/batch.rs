use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use glob::Pattern;
use thiserror::Error;
use walkdir::WalkDir;

use super::callback::{FileImporter, UploadHandle};
use super::report::{BatchAccumulator, BatchReport, JobResult};

/// Errors that abort a batch before any report is produced. Per-file
/// failures never surface here; they are absorbed into the report.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("folder not found: {path}")]
    FolderNotFound { path: String },
    #[error("invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Options for [`import_folder`].
#[derive(Debug, Clone)]
pub struct FolderOptions {
    /// Descend into subdirectories. Default: top level only.
    pub recursive: bool,
    /// Glob matched against file names inside the folder.
    pub pattern: String,
    /// Archive inputs whose callback ran to completion.
    pub move_processed: bool,
    /// Archive directory name prefix; the second-resolution timestamp is
    /// appended, so one batch normally shares a single directory. A batch
    /// that straddles a second boundary may archive into two.
    pub archive_prefix: String,
}

impl Default for FolderOptions {
    fn default() -> Self {
        FolderOptions {
            recursive: false,
            pattern: super::DEFAULT_PATTERN.to_string(),
            move_processed: true,
            archive_prefix: super::DEFAULT_ARCHIVE_PREFIX.to_string(),
        }
    }
}

/// Import every file in `folder` matching the configured pattern.
///
/// Files are processed one at a time in path order; a callback failure is
/// recorded against that file and the batch continues. Zero matching
/// files is a normal result, not an error.
pub fn import_folder(
    folder: &Path,
    importer: &dyn FileImporter,
    options: &FolderOptions,
) -> Result<BatchReport, ImportError> {
    if !folder.is_dir() {
        return Err(ImportError::FolderNotFound {
            path: folder.display().to_string(),
        });
    }

    let pattern = Pattern::new(&options.pattern).map_err(|source| ImportError::Pattern {
        pattern: options.pattern.clone(),
        source,
    })?;

    let files = enumerate_files(folder, &pattern, options.recursive);
    if files.is_empty() {
        return Ok(BatchReport::empty(format!(
            "No files found in {}",
            folder.display()
        )));
    }

    tracing::info!(
        target: "bulk_import",
        event = "folder_import_started",
        folder = %folder.display(),
        pattern = %options.pattern,
        files = files.len(),
    );

    let mut batch = BatchAccumulator::new(files.len());
    for path in &files {
        let name = display_name(path);
        match importer.import(path) {
            Ok(outcome) => {
                batch.record(JobResult::completed(name, Some(path), outcome));
                if options.move_processed && path.exists() {
                    archive_processed(path, &options.archive_prefix);
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "bulk_import",
                    event = "file_import_failed",
                    file = %name,
                    error = %err,
                );
                batch.record(JobResult::failed(name, Some(path), format!("{err:#}")));
            }
        }
    }

    let report = batch.finish();
    tracing::info!(
        target: "bulk_import",
        event = "folder_import_finished",
        successful = report.successful_files,
        failed = report.failed_files,
        summary = %report.summary,
    );
    Ok(report)
}

/// Import a sequence of already-received payloads, e.g. HTTP uploads.
///
/// Handles reporting themselves invalid are recorded as failures without
/// invoking the callback. The caller owns each payload's lifecycle, so
/// nothing is archived here.
pub fn import_uploads<H: UploadHandle>(files: &[H], importer: &dyn FileImporter) -> BatchReport {
    tracing::info!(
        target: "bulk_import",
        event = "upload_import_started",
        files = files.len(),
    );

    let mut batch = BatchAccumulator::new(files.len());
    for file in files {
        let name = file.name().to_string();
        if !file.is_valid() {
            batch.record(JobResult::failed(
                name,
                None,
                format!("Invalid file: {}", file.error_detail()),
            ));
            continue;
        }
        match importer.import(file.temp_path()) {
            Ok(outcome) => batch.record(JobResult::completed(name, None, outcome)),
            Err(err) => {
                tracing::warn!(
                    target: "bulk_import",
                    event = "upload_import_failed",
                    file = %name,
                    error = %err,
                );
                batch.record(JobResult::failed(name, None, format!("{err:#}")));
            }
        }
    }
    batch.finish()
}

/// Matching files under `folder`, sorted by path for deterministic
/// enumeration order.
fn enumerate_files(folder: &Path, pattern: &Pattern, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Best-effort move of a processed input into a timestamped sibling
/// directory. Failures are logged and never reclassify the job.
fn archive_processed(path: &Path, prefix: &str) {
    let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
        return;
    };

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let archive_dir = parent.join(format!("{prefix}{timestamp}"));
    // create_dir_all is a no-op when an earlier job in the same second
    // already created the directory.
    if let Err(err) = fs::create_dir_all(&archive_dir) {
        tracing::warn!(
            target: "bulk_import",
            event = "archive_dir_failed",
            dir = %archive_dir.display(),
            error = %err,
        );
    }

    let destination = archive_dir.join(file_name);
    if let Err(err) = fs::rename(path, &destination) {
        tracing::warn!(
            target: "bulk_import",
            event = "archive_move_failed",
            file = %path.display(),
            dir = %archive_dir.display(),
            error = %err,
        );
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
