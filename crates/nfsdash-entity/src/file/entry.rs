//! Transient file entry derived from filesystem state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file or directory as observed at request time.
///
/// Never persisted; always recomputed from the sandboxed filesystem.
/// `path` is sandbox-relative and `/`-rooted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Entry name (final path component).
    pub name: String,
    /// Sandbox-relative path, e.g. `/docs/a.txt`.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Size in bytes (0 for directories on some filesystems).
    pub size: u64,
    /// Last modification time.
    #[serde(rename = "lastModified")]
    pub last_modified: Option<DateTime<Utc>>,
}
