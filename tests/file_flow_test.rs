//! End-to-end file operations against a temporary sandbox.

use bytes::Bytes;

use nfsdash_core::error::ErrorKind;
use nfsdash_entity::settings::SystemSettings;
use nfsdash_service::file::FileService;

fn settings() -> SystemSettings {
    SystemSettings {
        max_file_size_mb: 10,
        allowed_file_types: String::new(),
        max_storage_per_user_mb: 100,
        enable_audit_log: false,
        session_timeout_minutes: 30,
    }
}

#[tokio::test]
async fn test_full_folder_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();
    let settings = settings();

    // Create /docs and upload a.txt into it.
    let folder = svc.create_folder("/", "docs").await.unwrap();
    assert_eq!(folder.path, "/docs");

    let data = Bytes::from("file body");
    svc.upload("/docs", "a.txt", data.len() as u64, data, &settings)
        .await
        .unwrap();

    // Listing /docs shows exactly a.txt.
    let entries = svc.list("/docs").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "a.txt");
    assert!(!entries[0].is_dir);

    // Rename to b.txt; listing shows b.txt only.
    svc.rename("/docs/a.txt", "b.txt").await.unwrap();
    let entries = svc.list("/docs").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "b.txt");

    // Delete /docs recursively; a later listing is NotFound.
    svc.delete("/docs").await.unwrap();
    let err = svc.list("/docs").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_sandbox_escape_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();

    for path in ["/../../etc/passwd", "..", "/docs/../.."] {
        let err = svc.info(path).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathViolation, "path: {path}");
    }
}

#[tokio::test]
async fn test_listing_sorts_directories_first() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();
    let settings = settings();

    svc.upload("/", "z.txt", 1, Bytes::from("z"), &settings)
        .await
        .unwrap();
    svc.create_folder("/", "alpha").await.unwrap();
    svc.create_folder("/", "beta").await.unwrap();

    let entries = svc.list("/").await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "z.txt"]);
}

#[tokio::test]
async fn test_rename_onto_existing_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();
    let settings = settings();

    svc.upload("/", "a.txt", 1, Bytes::from("a"), &settings)
        .await
        .unwrap();
    svc.upload("/", "b.txt", 1, Bytes::from("b"), &settings)
        .await
        .unwrap();

    let err = svc.rename("/a.txt", "b.txt").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_upload_into_missing_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();

    let err = svc
        .upload("/nope", "a.txt", 1, Bytes::from("a"), &settings())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_invalid_names_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let svc = FileService::new(dir.path().to_str().unwrap())
        .await
        .unwrap();

    for name in ["", ".", "..", "a/b"] {
        let err = svc.create_folder("/", name).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation, "name: {name}");
    }
}
