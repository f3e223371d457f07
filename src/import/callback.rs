use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What a single-file importer reports back for one input.
///
/// `success_count` and `failed_count` are the importer's own per-row
/// statistics; the orchestrator sums them across the batch but never
/// inspects them otherwise. Unknown fields in a host's JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_count: Option<u64>,
}

impl ImportOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        ImportOutcome {
            success: true,
            message: message.into(),
            success_count: None,
            failed_count: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ImportOutcome {
            success: false,
            message: message.into(),
            success_count: None,
            failed_count: None,
        }
    }

    pub fn with_counts(mut self, imported: u64, failed: u64) -> Self {
        self.success_count = Some(imported);
        self.failed_count = Some(failed);
        self
    }
}

/// The import callback contract: how the orchestrator asks the host
/// application to import one resolved input.
///
/// An `Err` return is the callback raising; the orchestrator converts it
/// into a failed [`JobResult`](super::report::JobResult) and moves on, so
/// one misbehaving input never aborts the batch.
pub trait FileImporter {
    fn import(&self, location: &Path) -> anyhow::Result<ImportOutcome>;
}

impl<F> FileImporter for F
where
    F: Fn(&Path) -> anyhow::Result<ImportOutcome>,
{
    fn import(&self, location: &Path) -> anyhow::Result<ImportOutcome> {
        self(location)
    }
}

/// One already-received file payload, e.g. a staged HTTP upload.
///
/// The orchestrator never touches the payload's lifecycle: no archival,
/// no cleanup. Invalid handles are recorded as failures without invoking
/// the callback.
pub trait UploadHandle {
    /// Client-facing display name, used as the job's key in the report.
    fn name(&self) -> &str;
    /// Where the payload was staged on disk.
    fn temp_path(&self) -> &Path;
    fn is_valid(&self) -> bool;
    /// Host-supplied explanation for an invalid handle.
    fn error_detail(&self) -> String;
}

/// Plain [`UploadHandle`] for hosts that stage uploads to temp files.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    temp_path: PathBuf,
    error: Option<String>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, temp_path: impl Into<PathBuf>) -> Self {
        UploadedFile {
            name: name.into(),
            temp_path: temp_path.into(),
            error: None,
        }
    }

    /// A handle the host already rejected (e.g. failed upload transfer).
    pub fn invalid(
        name: impl Into<String>,
        temp_path: impl Into<PathBuf>,
        error: impl Into<String>,
    ) -> Self {
        UploadedFile {
            name: name.into(),
            temp_path: temp_path.into(),
            error: Some(error.into()),
        }
    }
}

impl UploadHandle for UploadedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    fn error_detail(&self) -> String {
        self.error.clone().unwrap_or_default()
    }
}
