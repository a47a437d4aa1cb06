//! Authorization decision table for representative permission sets.

use nfsdash_auth::Authorizer;
use nfsdash_entity::role::Permission;
use nfsdash_entity::role::PermissionAction::{Admin, Delete, Read, Write};
use nfsdash_service::context::RequestContext;
use uuid::Uuid;

fn ctx(grants: Vec<Permission>) -> RequestContext {
    RequestContext::new(
        Uuid::new_v4(),
        "user@example.com".to_string(),
        "test".to_string(),
        grants,
    )
}

#[test]
fn test_viewer_role_decision_table() {
    let viewer = ctx(vec![Permission::new(Read, "*")]);

    assert!(viewer.require(Read, "/").is_ok());
    assert!(viewer.require(Read, "/docs/a.txt").is_ok());
    assert!(viewer.require(Write, "/docs").is_err());
    assert!(viewer.require(Delete, "/docs").is_err());
    assert!(viewer.require(Admin, "/admin/users").is_err());
}

#[test]
fn test_admin_is_monotonic_over_all_actions() {
    let admin = ctx(vec![Permission::new(Admin, "*")]);

    for action in [Read, Write, Delete, Admin] {
        for path in ["/", "/docs", "/admin/settings", "/deep/nested/file.bin"] {
            assert!(
                admin.require(action, path).is_ok(),
                "admin denied {action} on {path}"
            );
        }
    }
}

#[test]
fn test_path_scoped_editor() {
    let editor = ctx(vec![
        Permission::new(Read, "*"),
        Permission::new(Write, "/projects"),
        Permission::new(Delete, "/projects"),
    ]);

    assert!(editor.require(Write, "/projects/report.pdf").is_ok());
    assert!(editor.require(Delete, "/projects/old").is_ok());
    assert!(editor.require(Read, "/anywhere").is_ok());

    // Write access stops at the grant boundary.
    assert!(editor.require(Write, "/projects-backup").is_err());
    assert!(editor.require(Write, "/home").is_err());
    assert!(editor.require(Admin, "/admin/roles").is_err());
}

#[test]
fn test_no_grants_is_implicit_deny() {
    let nobody = ctx(vec![]);

    for action in [Read, Write, Delete, Admin] {
        assert!(nobody.require(action, "/").is_err());
    }
}

#[test]
fn test_decision_matches_authorizer_directly() {
    let grants = vec![Permission::new(Write, "/docs")];
    let authorizer = Authorizer::new();

    assert!(authorizer.is_allowed(&grants, Write, "/docs/sub/file"));
    assert!(!authorizer.is_allowed(&grants, Write, "/docsier"));
    assert!(!authorizer.is_allowed(&grants, Read, "/docs"));
}
