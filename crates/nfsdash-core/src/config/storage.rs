//! File sandbox configuration.

use serde::{Deserialize, Serialize};

/// Sandboxed filesystem configuration.
///
/// Every file operation is confined to `root_path`; client paths are
/// normalized and rejected if they resolve outside of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the file sandbox.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Hard cap on the HTTP request body for uploads, in bytes.
    ///
    /// The per-file limit enforced against uploads comes from the persisted
    /// system settings; this bound protects the server itself.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

fn default_root_path() -> String {
    "./data/files".to_string()
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}
