//! Sandbox path normalization.
//!
//! All client-supplied paths are reduced lexically — without touching the
//! filesystem — to a `/`-rooted canonical form. A path whose resolved form
//! would climb above the sandbox root is rejected.

use nfsdash_core::{AppError, AppResult};

/// Normalize a client path to its `/`-rooted canonical form.
///
/// Resolves `.` and `..` components and collapses duplicate separators.
/// Returns `PathViolation` if the path escapes the root. Idempotent:
/// `normalize(normalize(p)) == normalize(p)` for every accepted `p`.
pub fn normalize(path: &str) -> AppResult<String> {
    if path.contains('\0') {
        return Err(AppError::path_violation("Path contains a NUL byte"));
    }

    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if components.pop().is_none() {
                    return Err(AppError::path_violation(format!(
                        "Path '{path}' escapes the sandbox root"
                    )));
                }
            }
            other => components.push(other),
        }
    }

    if components.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}", components.join("/")))
    }
}

/// Validate a single new file or folder name.
///
/// Rejects empty names, path separators, `.`/`..`, and NUL bytes.
pub fn validate_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::validation("Name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(AppError::validation(format!("Invalid name: '{name}'")));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(AppError::validation(format!(
            "Name '{name}' contains reserved characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfsdash_core::error::ErrorKind;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("").unwrap(), "/");
        assert_eq!(normalize("/").unwrap(), "/");
        assert_eq!(normalize("docs").unwrap(), "/docs");
        assert_eq!(normalize("/docs/a.txt").unwrap(), "/docs/a.txt");
        assert_eq!(normalize("//docs///a.txt").unwrap(), "/docs/a.txt");
        assert_eq!(normalize("/docs/./a.txt").unwrap(), "/docs/a.txt");
        assert_eq!(normalize("/docs/sub/../a.txt").unwrap(), "/docs/a.txt");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["/docs/sub/../a.txt", "docs//x/./y", "/", ""] {
            let once = normalize(input).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_escape_is_rejected() {
        for input in ["..", "/..", "/../../etc/passwd", "docs/../../x"] {
            let err = normalize(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::PathViolation, "input: {input}");
        }
    }

    #[test]
    fn test_dotdot_inside_is_allowed() {
        assert_eq!(normalize("/a/b/../c").unwrap(), "/a/c");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("report.pdf").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }
}
