use std::cell::Cell;
use std::path::Path;

use bulk_import_lib::{import_uploads, ImportOutcome, UploadedFile};

#[test]
fn empty_upload_set_is_a_clean_report() {
    let uploads: Vec<UploadedFile> = Vec::new();
    let importer = |_: &Path| -> anyhow::Result<ImportOutcome> { Ok(ImportOutcome::ok("unused")) };

    let report = import_uploads(&uploads, &importer);
    assert!(report.success);
    assert_eq!(report.total_files, 0);
    assert_eq!(report.summary, "No files processed");
}

#[test]
fn invalid_handle_never_reaches_the_callback() {
    let uploads = vec![
        UploadedFile::new("good.csv", "/tmp/stage/good"),
        UploadedFile::invalid("broken.csv", "/tmp/stage/broken", "partial upload"),
    ];

    let calls = Cell::new(0usize);
    let importer = |_: &Path| -> anyhow::Result<ImportOutcome> {
        calls.set(calls.get() + 1);
        Ok(ImportOutcome::ok("imported").with_counts(3, 0))
    };

    let report = import_uploads(&uploads, &importer);
    assert_eq!(calls.get(), 1);
    assert!(!report.success);
    assert_eq!(report.successful_files, 1);
    assert_eq!(report.failed_files, 1);
    assert_eq!(report.total_items_imported, 3);

    let rejected = &report.files[1];
    assert_eq!(rejected.file, "broken.csv");
    assert!(!rejected.processed);
    assert_eq!(rejected.message, "Error: Invalid file: partial upload");
    assert_eq!(
        report.errors.get("broken.csv").map(String::as_str),
        Some("Invalid file: partial upload")
    );
}

#[test]
fn callback_sees_the_staged_location() {
    let uploads = vec![UploadedFile::new("items.csv", "/tmp/stage/items-001")];

    let importer = |location: &Path| -> anyhow::Result<ImportOutcome> {
        assert_eq!(location, Path::new("/tmp/stage/items-001"));
        Ok(ImportOutcome::ok("imported"))
    };

    let report = import_uploads(&uploads, &importer);
    assert!(report.success);
    // Upload jobs carry no filesystem path in the report; the handle's
    // display name is the job key.
    assert!(report.files[0].path.is_none());
}

#[test]
fn uploads_keep_their_submission_order() {
    let uploads = vec![
        UploadedFile::new("z.csv", "/tmp/z"),
        UploadedFile::new("a.csv", "/tmp/a"),
    ];
    let importer = |_: &Path| -> anyhow::Result<ImportOutcome> { Ok(ImportOutcome::ok("imported")) };

    let report = import_uploads(&uploads, &importer);
    let names: Vec<_> = report.files.iter().map(|job| job.file.as_str()).collect();
    assert_eq!(names, ["z.csv", "a.csv"]);
}

#[test]
fn raising_callback_is_absorbed_per_upload() {
    let uploads = vec![
        UploadedFile::new("a.csv", "/tmp/a"),
        UploadedFile::new("b.csv", "/tmp/b"),
    ];
    let importer = |location: &Path| -> anyhow::Result<ImportOutcome> {
        anyhow::ensure!(!location.ends_with("a"), "host rejected the payload");
        Ok(ImportOutcome::ok("imported"))
    };

    let report = import_uploads(&uploads, &importer);
    assert!(!report.success);
    assert_eq!(report.processed_files, 2);
    assert_eq!(report.successful_files, 1);
    assert!(report.errors["a.csv"].contains("host rejected"));
}
