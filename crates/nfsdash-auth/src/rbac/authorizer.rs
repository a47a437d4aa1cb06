//! RBAC enforcement — matches a role's permission grants against a
//! requested (action, path) pair.

use nfsdash_core::error::AppError;
use nfsdash_entity::role::{Permission, PermissionAction};

/// Decides whether a permission set authorizes a requested action on a
/// resource path.
///
/// Decision rule, applied grant by grant with first match winning:
/// - the grant's action must equal the requested action, or be `Admin`,
///   which authorizes every action;
/// - the grant's resource must be `"*"`, equal the requested path, or be a
///   prefix of it on a path-component boundary.
///
/// There are no deny grants; a set with no matching grant is an implicit
/// deny.
#[derive(Debug, Clone, Default)]
pub struct Authorizer;

impl Authorizer {
    /// Creates a new authorizer.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the permission set allows the action on the path.
    ///
    /// `path` must already be normalized (`/`-rooted, no `.`/`..`
    /// components); resource patterns are normalized on the fly so that a
    /// grant stored as `"/docs/"` still matches `/docs/a.txt`.
    pub fn is_allowed(&self, permissions: &[Permission], action: PermissionAction, path: &str) -> bool {
        permissions
            .iter()
            .any(|p| action_matches(p.action, action) && resource_matches(&p.resource, path))
    }

    /// Checks the permission set, returning `Forbidden` on an implicit deny.
    pub fn require(
        &self,
        permissions: &[Permission],
        action: PermissionAction,
        path: &str,
    ) -> Result<(), AppError> {
        if self.is_allowed(permissions, action, path) {
            Ok(())
        } else {
            tracing::debug!(%action, path, "Authorization denied");
            Err(AppError::forbidden(format!(
                "No permission for action '{action}' on '{path}'"
            )))
        }
    }
}

/// An `Admin` grant authorizes every action; otherwise actions must match.
fn action_matches(granted: PermissionAction, requested: PermissionAction) -> bool {
    granted == PermissionAction::Admin || granted == requested
}

/// `*` matches any path; otherwise exact or component-boundary prefix match
/// on the normalized pattern.
fn resource_matches(pattern: &str, path: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let pattern = normalize_pattern(pattern);
    if pattern == "/" {
        return true;
    }

    path == pattern || path.starts_with(&format!("{pattern}/"))
}

/// Reduce a stored pattern to a `/`-rooted form without a trailing slash.
fn normalize_pattern(pattern: &str) -> String {
    let trimmed = pattern.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(grants: &[(PermissionAction, &str)]) -> Vec<Permission> {
        grants
            .iter()
            .map(|(a, r)| Permission::new(*a, *r))
            .collect()
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let auth = Authorizer::new();
        let set = perms(&[(PermissionAction::Read, "*")]);

        assert!(auth.is_allowed(&set, PermissionAction::Read, "/"));
        assert!(auth.is_allowed(&set, PermissionAction::Read, "/docs/deep/file.txt"));
        assert!(!auth.is_allowed(&set, PermissionAction::Write, "/docs"));
    }

    #[test]
    fn test_admin_authorizes_every_action() {
        let auth = Authorizer::new();
        let set = perms(&[(PermissionAction::Admin, "*")]);

        for action in [
            PermissionAction::Read,
            PermissionAction::Write,
            PermissionAction::Delete,
            PermissionAction::Admin,
        ] {
            assert!(auth.is_allowed(&set, action, "/anything/at/all"));
        }
    }

    #[test]
    fn test_prefix_matches_on_component_boundary() {
        let auth = Authorizer::new();
        let set = perms(&[(PermissionAction::Write, "/docs")]);

        assert!(auth.is_allowed(&set, PermissionAction::Write, "/docs"));
        assert!(auth.is_allowed(&set, PermissionAction::Write, "/docs/a.txt"));
        assert!(!auth.is_allowed(&set, PermissionAction::Write, "/docs-archive"));
        assert!(!auth.is_allowed(&set, PermissionAction::Write, "/other"));
    }

    #[test]
    fn test_scoped_admin_does_not_leak() {
        let auth = Authorizer::new();
        let set = perms(&[(PermissionAction::Admin, "/projects")]);

        assert!(auth.is_allowed(&set, PermissionAction::Delete, "/projects/x"));
        assert!(!auth.is_allowed(&set, PermissionAction::Read, "/private"));
    }

    #[test]
    fn test_empty_set_denies() {
        let auth = Authorizer::new();
        assert!(!auth.is_allowed(&[], PermissionAction::Read, "/"));
    }

    #[test]
    fn test_first_match_wins_is_order_insensitive_for_allows() {
        // With allow-only grants the decision is the same regardless of
        // which grant matches first.
        let auth = Authorizer::new();
        let set = perms(&[
            (PermissionAction::Read, "/a"),
            (PermissionAction::Read, "*"),
        ]);
        assert!(auth.is_allowed(&set, PermissionAction::Read, "/b"));
    }

    #[test]
    fn test_pattern_normalization() {
        let auth = Authorizer::new();
        let set = perms(&[(PermissionAction::Read, "docs/")]);
        assert!(auth.is_allowed(&set, PermissionAction::Read, "/docs/a.txt"));
    }

    #[test]
    fn test_require_maps_to_forbidden() {
        let auth = Authorizer::new();
        let err = auth
            .require(&[], PermissionAction::Delete, "/docs")
            .unwrap_err();
        assert_eq!(err.kind, nfsdash_core::error::ErrorKind::Forbidden);
    }
}
