//! Batch CSV import orchestration for an existing point-of-sale host.
//!
//! The host application owns CSV parsing, validation, and persistence;
//! this crate only knows how to run many of its single-file imports as
//! one batch: enumerate a work source, invoke the import callback per
//! file, isolate failures, archive processed inputs, and fold everything
//! into one [`BatchReport`].

pub mod import;
pub mod logging;

pub use import::{
    import_folder, import_uploads, BatchReport, CommandImporter, FileImporter, FolderOptions,
    ImportError, ImportOutcome, JobResult, UploadHandle, UploadedFile,
};
