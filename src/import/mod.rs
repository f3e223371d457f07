pub mod batch;
pub mod callback;
pub mod command;
pub mod report;

pub use batch::{import_folder, import_uploads, FolderOptions, ImportError};
pub use callback::{FileImporter, ImportOutcome, UploadHandle, UploadedFile};
pub use command::CommandImporter;
pub use report::{BatchReport, JobResult};

pub const DEFAULT_PATTERN: &str = "*.csv";
pub const DEFAULT_ARCHIVE_PREFIX: &str = "imported_";
