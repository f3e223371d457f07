use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::callback::ImportOutcome;

/// Outcome of one file's import attempt within a batch.
///
/// The serialized shape is the wire contract consumed by the host
/// application's presentation layer; field names must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Display name of the input (file name, or upload client name).
    pub file: String,
    /// Resolved filesystem location. Folder imports only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Per-file success flag. Wire name `status` predates this crate.
    #[serde(rename = "status")]
    pub success: bool,
    pub message: String,
    /// The callback's outcome, `null` when the callback never returned one.
    pub result: Option<ImportOutcome>,
    /// Whether the callback ran to completion for this input.
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobResult {
    /// Record a callback that ran to completion, whatever its verdict.
    pub fn completed(file: String, path: Option<&Path>, outcome: ImportOutcome) -> Self {
        let message = if outcome.message.is_empty() {
            "Import completed".to_string()
        } else {
            outcome.message.clone()
        };
        JobResult {
            file,
            path: path.map(|p| p.display().to_string()),
            success: outcome.success,
            message,
            result: Some(outcome),
            processed: true,
            error: None,
        }
    }

    /// Record a callback that raised, or an input rejected before the
    /// callback could run. `processed == false` forces `success == false`.
    pub fn failed(file: String, path: Option<&Path>, error: String) -> Self {
        JobResult {
            file,
            path: path.map(|p| p.display().to_string()),
            success: false,
            message: format!("Error: {error}"),
            result: None,
            processed: false,
            error: Some(error),
        }
    }
}

/// Aggregated result of one orchestrator invocation.
///
/// Serialized keys are fixed: `success, total_files, processed_files,
/// successful_files, failed_files, total_items_imported,
/// total_items_failed, files, errors, summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// True iff no per-file error occurred (`errors` is empty).
    pub success: bool,
    pub total_files: usize,
    pub processed_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub total_items_imported: u64,
    pub total_items_failed: u64,
    /// Per-job records in enumeration order.
    pub files: Vec<JobResult>,
    /// Failing job name to error message, sorted by name.
    pub errors: BTreeMap<String, String>,
    pub summary: String,
}

impl BatchReport {
    /// Zero-count report for an empty work source. Not an error path.
    pub fn empty(summary: impl Into<String>) -> Self {
        BatchReport {
            success: false,
            total_files: 0,
            processed_files: 0,
            successful_files: 0,
            failed_files: 0,
            total_items_imported: 0,
            total_items_failed: 0,
            files: Vec::new(),
            errors: BTreeMap::new(),
            summary: summary.into(),
        }
    }
}

/// Accumulates per-job outcomes; both entry points fold through it.
#[derive(Debug)]
pub(crate) struct BatchAccumulator {
    total_files: usize,
    processed_files: usize,
    results: Vec<JobResult>,
    errors: BTreeMap<String, String>,
}

impl BatchAccumulator {
    pub(crate) fn new(total_files: usize) -> Self {
        BatchAccumulator {
            total_files,
            processed_files: 0,
            results: Vec::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Every enumerated job is recorded exactly once, attempted or not.
    pub(crate) fn record(&mut self, job: JobResult) {
        self.processed_files += 1;
        if let Some(error) = &job.error {
            self.errors.insert(job.file.clone(), error.clone());
        }
        self.results.push(job);
    }

    pub(crate) fn finish(self) -> BatchReport {
        let mut successful_files = 0usize;
        let mut failed_files = 0usize;
        let mut items_imported = 0u64;
        let mut items_failed = 0u64;

        for job in &self.results {
            if job.processed {
                if job.success {
                    successful_files += 1;
                    items_imported += job
                        .result
                        .as_ref()
                        .and_then(|outcome| outcome.success_count)
                        .unwrap_or(0);
                } else {
                    failed_files += 1;
                    items_failed += job
                        .result
                        .as_ref()
                        .and_then(|outcome| outcome.failed_count)
                        .unwrap_or(0);
                }
            } else {
                // Inner counts are unknown when the callback never returned.
                failed_files += 1;
            }
        }

        let summary = build_summary(successful_files, failed_files, items_imported, items_failed);
        BatchReport {
            success: self.errors.is_empty(),
            total_files: self.total_files,
            processed_files: self.processed_files,
            successful_files,
            failed_files,
            total_items_imported: items_imported,
            total_items_failed: items_failed,
            files: self.results,
            errors: self.errors,
            summary,
        }
    }
}

fn build_summary(successful: usize, failed: usize, items_imported: u64, items_failed: u64) -> String {
    let mut parts = Vec::new();

    if successful > 0 {
        parts.push(format!("✓ {successful} file(s) imported successfully"));
        if items_imported > 0 {
            parts.push(format!("({items_imported} items)"));
        }
    }

    if failed > 0 {
        parts.push(format!("✗ {failed} file(s) failed"));
        if items_failed > 0 {
            parts.push(format!("({items_failed} items)"));
        }
    }

    if parts.is_empty() {
        "No files processed".to_string()
    } else {
        parts.join(" ")
    }
}
