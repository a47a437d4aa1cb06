//! Permission value type granted by roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use nfsdash_core::AppError;

/// Actions a permission can grant on a resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionAction {
    /// List directories, download and preview files.
    Read,
    /// Create folders, upload, rename.
    Write,
    /// Remove files and folders.
    Delete,
    /// Full access, including the admin surface. Authorizes every action.
    Admin,
}

impl PermissionAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::validation(format!(
                "Invalid permission action: '{s}'. Expected one of: read, write, delete, admin"
            ))),
        }
    }
}

/// A single grant of an action on a resource pattern.
///
/// `resource` is either `"*"` (any path) or a normalized sandbox path; a
/// request path matches by exact equality or by lying under the pattern.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// The granted action.
    pub action: PermissionAction,
    /// The resource pattern the action applies to.
    pub resource: String,
}

impl Permission {
    /// Create a new permission grant.
    pub fn new(action: PermissionAction, resource: impl Into<String>) -> Self {
        Self {
            action,
            resource: resource.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_str() {
        assert_eq!(
            "admin".parse::<PermissionAction>().unwrap(),
            PermissionAction::Admin
        );
        assert_eq!(
            "READ".parse::<PermissionAction>().unwrap(),
            PermissionAction::Read
        );
        assert!("owner".parse::<PermissionAction>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let perm = Permission::new(PermissionAction::Write, "/docs");
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, r#"{"action":"write","resource":"/docs"}"#);
        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, perm);
    }
}
