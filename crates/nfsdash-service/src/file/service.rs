//! Sandboxed file operations.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use nfsdash_core::error::{AppError, ErrorKind};
use nfsdash_core::result::AppResult;
use nfsdash_entity::file::FileEntry;
use nfsdash_entity::settings::SystemSettings;

use super::path::{normalize, validate_name};

/// Executes filesystem operations confined to a sandbox root.
///
/// Every public method accepts a client path, normalizes it, and refuses
/// anything that resolves outside the root. Returned entries carry
/// sandbox-relative paths.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Absolute root directory; nothing above it is ever touched.
    root: PathBuf,
}

impl FileService {
    /// Create a service rooted at the given path, creating it if missing.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create sandbox root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a normalized sandbox path to an absolute path within the root.
    fn resolve(&self, normalized: &str) -> PathBuf {
        self.root.join(normalized.trim_start_matches('/'))
    }

    /// List a directory's entries, directories first, then by name.
    pub async fn list(&self, path: &str) -> AppResult<Vec<FileEntry>> {
        let norm = normalize(path)?;
        let full = self.resolve(&norm);

        let meta = stat(&full, &norm).await?;
        if !meta.is_dir() {
            return Err(AppError::validation(format!(
                "Path '{norm}' is not a directory"
            )));
        }

        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&full).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {norm}"),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let entry_meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;

            let name = entry.file_name().to_string_lossy().to_string();
            let entry_path = join_sandbox_path(&norm, &name);
            entries.push(make_entry(name, entry_path, &entry_meta));
        }

        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then(a.name.cmp(&b.name)));
        Ok(entries)
    }

    /// Metadata for a single file or directory.
    pub async fn info(&self, path: &str) -> AppResult<FileEntry> {
        let norm = normalize(path)?;
        let full = self.resolve(&norm);
        let meta = stat(&full, &norm).await?;

        Ok(make_entry(entry_name(&norm), norm, &meta))
    }

    /// Create a new folder under an existing directory.
    pub async fn create_folder(&self, path: &str, name: &str) -> AppResult<FileEntry> {
        validate_name(name)?;
        let parent = normalize(path)?;
        let parent_full = self.resolve(&parent);

        let parent_meta = stat(&parent_full, &parent).await?;
        if !parent_meta.is_dir() {
            return Err(AppError::validation(format!(
                "Path '{parent}' is not a directory"
            )));
        }

        let target = join_sandbox_path(&parent, name);
        let target_full = self.resolve(&target);
        if path_exists(&target_full).await {
            return Err(AppError::conflict(format!("'{target}' already exists")));
        }

        fs::create_dir(&target_full).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create folder: {target}"),
                e,
            )
        })?;

        let meta = stat(&target_full, &target).await?;
        debug!(path = %target, "Created folder");
        Ok(make_entry(name.to_string(), target, &meta))
    }

    /// Write an uploaded file into an existing directory.
    ///
    /// The declared size is checked against the configured per-file and
    /// per-user storage limits before anything touches disk, and the
    /// extension against the allow-list. An existing file with the same
    /// name is overwritten.
    pub async fn upload(
        &self,
        path: &str,
        file_name: &str,
        declared_size: u64,
        data: Bytes,
        settings: &SystemSettings,
    ) -> AppResult<FileEntry> {
        validate_name(file_name)?;
        check_extension(file_name, settings)?;

        let max_file = settings.max_file_size_bytes();
        if max_file > 0 && declared_size > max_file {
            return Err(AppError::quota_exceeded(format!(
                "File of {declared_size} bytes exceeds the {max_file} byte limit"
            )));
        }

        let max_storage = settings.max_storage_per_user_bytes();
        if max_storage > 0 {
            let used = dir_size(&self.root).await?;
            if used.saturating_add(declared_size) > max_storage {
                return Err(AppError::quota_exceeded(format!(
                    "Upload of {declared_size} bytes would exceed the {max_storage} byte storage limit"
                )));
            }
        }

        let parent = normalize(path)?;
        let parent_full = self.resolve(&parent);
        let parent_meta = stat(&parent_full, &parent).await?;
        if !parent_meta.is_dir() {
            return Err(AppError::validation(format!(
                "Path '{parent}' is not a directory"
            )));
        }

        let target = join_sandbox_path(&parent, file_name);
        let target_full = self.resolve(&target);
        fs::write(&target_full, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {target}"),
                e,
            )
        })?;

        let meta = stat(&target_full, &target).await?;
        debug!(path = %target, bytes = data.len(), "Uploaded file");
        Ok(make_entry(file_name.to_string(), target, &meta))
    }

    /// Open a file for streaming; returns its entry and the handle.
    pub async fn open_for_read(&self, path: &str) -> AppResult<(FileEntry, fs::File)> {
        let norm = normalize(path)?;
        let full = self.resolve(&norm);

        let meta = stat(&full, &norm).await?;
        if meta.is_dir() {
            return Err(AppError::not_found(format!("'{norm}' is not a file")));
        }

        let file = fs::File::open(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {norm}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {norm}"),
                    e,
                )
            }
        })?;

        Ok((make_entry(entry_name(&norm), norm, &meta), file))
    }

    /// Rename a file or folder in place.
    pub async fn rename(&self, path: &str, new_name: &str) -> AppResult<FileEntry> {
        validate_name(new_name)?;
        let norm = normalize(path)?;
        if norm == "/" {
            return Err(AppError::path_violation("Cannot rename the sandbox root"));
        }

        let source_full = self.resolve(&norm);
        stat(&source_full, &norm).await?;

        let parent = parent_path(&norm);
        let target = join_sandbox_path(&parent, new_name);
        let target_full = self.resolve(&target);
        if path_exists(&target_full).await {
            return Err(AppError::conflict(format!("'{target}' already exists")));
        }

        fs::rename(&source_full, &target_full).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to rename {norm} -> {target}"),
                e,
            )
        })?;

        let meta = stat(&target_full, &target).await?;
        debug!(from = %norm, to = %target, "Renamed entry");
        Ok(make_entry(new_name.to_string(), target, &meta))
    }

    /// Delete a file or folder; directories are removed recursively.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let norm = normalize(path)?;
        if norm == "/" {
            return Err(AppError::path_violation("Cannot delete the sandbox root"));
        }

        let full = self.resolve(&norm);
        let meta = stat(&full, &norm).await?;

        if meta.is_dir() {
            fs::remove_dir_all(&full).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete directory: {norm}"),
                    e,
                )
            })?;
        } else {
            fs::remove_file(&full).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {norm}"),
                    e,
                )
            })?;
        }

        debug!(path = %norm, "Deleted entry");
        Ok(())
    }

    /// Total bytes stored under the sandbox root.
    pub async fn usage(&self) -> AppResult<u64> {
        dir_size(&self.root).await
    }

    /// Recursive sizes of the root's top-level directories.
    pub async fn top_level_usages(&self) -> AppResult<Vec<(String, u64)>> {
        let mut usages = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read sandbox root", e)
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;
            if meta.is_dir() {
                let size = dir_size(&entry.path()).await?;
                usages.push((entry.file_name().to_string_lossy().to_string(), size));
            }
        }

        usages.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(usages)
    }
}

/// Stat a path, mapping a missing entry to `NotFound`.
async fn stat(full: &Path, display: &str) -> AppResult<std::fs::Metadata> {
    fs::metadata(full).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found(format!("Path not found: {display}"))
        } else {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat path: {display}"),
                e,
            )
        }
    })
}

async fn path_exists(full: &Path) -> bool {
    fs::metadata(full).await.is_ok()
}

fn make_entry(name: String, path: String, meta: &std::fs::Metadata) -> FileEntry {
    let last_modified = meta
        .modified()
        .ok()
        .map(|t| DateTime::<Utc>::from(t));

    FileEntry {
        name,
        path,
        is_dir: meta.is_dir(),
        size: meta.len(),
        last_modified,
    }
}

fn entry_name(normalized: &str) -> String {
    normalized
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("/")
        .to_string()
}

fn parent_path(normalized: &str) -> String {
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

fn join_sandbox_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Reject extensions outside the configured allow-list.
fn check_extension(file_name: &str, settings: &SystemSettings) -> AppResult<()> {
    let allowed = settings.allowed_extensions();
    if allowed.is_empty() {
        return Ok(());
    }

    let ext = file_name
        .rsplit('.')
        .next()
        .filter(|e| *e != file_name)
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !allowed.contains(&ext) {
        return Err(AppError::type_not_allowed(format!(
            "File type '.{ext}' is not allowed"
        )));
    }
    Ok(())
}

/// Recursive directory size via an iterative walk.
async fn dir_size(root: &Path) -> AppResult<u64> {
    let mut total = 0u64;
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut entries = match fs::read_dir(&dir).await {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read directory: {}", dir.display()),
                    e,
                ));
            }
        };

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;
            if meta.is_dir() {
                stack.push(entry.path());
            } else {
                total += meta.len();
            }
        }
    }

    Ok(total)
}

/// Guess a MIME type from a file name extension.
pub fn mime_for(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit('.').next()?.to_lowercase();
    let mime = match ext.as_str() {
        "txt" | "log" | "md" | "ini" | "conf" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permissive_settings() -> SystemSettings {
        SystemSettings {
            max_file_size_mb: 10,
            allowed_file_types: String::new(),
            max_storage_per_user_mb: 100,
            enable_audit_log: false,
            session_timeout_minutes: 30,
        }
    }

    async fn service() -> (tempfile::TempDir, FileService) {
        let dir = tempfile::tempdir().unwrap();
        let svc = FileService::new(dir.path().to_str().unwrap()).await.unwrap();
        (dir, svc)
    }

    #[tokio::test]
    async fn test_create_list_delete_folder() {
        let (_dir, svc) = service().await;

        let folder = svc.create_folder("/", "docs").await.unwrap();
        assert_eq!(folder.path, "/docs");
        assert!(folder.is_dir);

        let entries = svc.list("/").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "docs");

        svc.delete("/docs").await.unwrap();
        let err = svc.list("/docs").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_folder_conflicts() {
        let (_dir, svc) = service().await;
        svc.create_folder("/", "docs").await.unwrap();
        let err = svc.create_folder("/", "docs").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_upload_and_rename_flow() {
        let (_dir, svc) = service().await;
        let settings = permissive_settings();

        svc.create_folder("/", "docs").await.unwrap();
        let data = Bytes::from("hello");
        let file = svc
            .upload("/docs", "a.txt", data.len() as u64, data, &settings)
            .await
            .unwrap();
        assert_eq!(file.path, "/docs/a.txt");

        let entries = svc.list("/docs").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.txt");

        let renamed = svc.rename("/docs/a.txt", "b.txt").await.unwrap();
        assert_eq!(renamed.path, "/docs/b.txt");

        let entries = svc.list("/docs").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "b.txt");
    }

    #[tokio::test]
    async fn test_upload_quota_and_type_checks() {
        let (_dir, svc) = service().await;

        let restrictive = SystemSettings {
            max_file_size_mb: 1,
            allowed_file_types: ".pdf".to_string(),
            max_storage_per_user_mb: 100,
            enable_audit_log: false,
            session_timeout_minutes: 30,
        };

        let err = svc
            .upload("/", "notes.txt", 10, Bytes::from("x"), &restrictive)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeNotAllowed);

        let err = svc
            .upload(
                "/",
                "big.pdf",
                2 * 1024 * 1024,
                Bytes::from("x"),
                &restrictive,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_escape_attempts_rejected() {
        let (_dir, svc) = service().await;

        let err = svc.list("/../../etc").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathViolation);

        let err = svc.delete("/..").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathViolation);

        let err = svc.delete("/").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathViolation);
    }

    #[tokio::test]
    async fn test_list_file_is_not_a_directory() {
        let (_dir, svc) = service().await;
        let settings = permissive_settings();
        svc.upload("/", "a.txt", 1, Bytes::from("x"), &settings)
            .await
            .unwrap();

        let err = svc.list("/a.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_open_for_read_streams_file() {
        let (_dir, svc) = service().await;
        let settings = permissive_settings();
        svc.upload("/", "a.txt", 5, Bytes::from("hello"), &settings)
            .await
            .unwrap();

        let (entry, mut file) = svc.open_for_read("/a.txt").await.unwrap();
        assert_eq!(entry.size, 5);

        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        file.read_to_string(&mut buf).await.unwrap();
        assert_eq!(buf, "hello");
    }

    #[tokio::test]
    async fn test_usage_accounting() {
        let (_dir, svc) = service().await;
        let settings = permissive_settings();

        svc.create_folder("/", "docs").await.unwrap();
        svc.upload("/docs", "a.bin", 4, Bytes::from("abcd"), &settings)
            .await
            .unwrap();

        assert_eq!(svc.usage().await.unwrap(), 4);
        let usages = svc.top_level_usages().await.unwrap();
        assert_eq!(usages, vec![("docs".to_string(), 4)]);
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_for("file.pdf"), Some("application/pdf"));
        assert_eq!(mime_for("img.PNG"), Some("image/png"));
        assert_eq!(mime_for("noext"), None);
    }
}
