//! Path utilities

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name used when a sanitized name comes out empty
pub const UNNAMED: &str = "_unnamed";

/// Characters that are not allowed in a path segment
const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Normalize path separators to forward slashes (for manifests)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Map a display name to a filesystem-safe path segment.
///
/// Spaces and reserved characters become `_`, line breaks and tabs are
/// dropped, runs of `_` collapse and leading/trailing `_` are trimmed. The
/// result can be empty; see [`sanitize_or_fallback`].
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let mapped = match c {
            '\n' | '\r' | '\t' => continue,
            ' ' => '_',
            c if RESERVED.contains(&c) => '_',
            c => c,
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }
    out.trim_matches('_').to_string()
}

/// [`sanitize_filename`], substituting [`UNNAMED`] for an empty result.
pub fn sanitize_or_fallback(name: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.is_empty() {
        UNNAMED.to_string()
    } else {
        sanitized
    }
}

/// Create `base/<seg1>/<seg2>/...` for a `/`-delimited name, one directory at a time.
///
/// Segments are trimmed of surrounding whitespace but otherwise used as is;
/// segments that are empty after trimming are skipped. Existing directories
/// are accepted.
///
/// # Errors
///
/// Returns [`Error::CreateDirectory`] naming the first directory that could not be created.
pub fn create_directory_structure(base: &Path, name: &str) -> Result<PathBuf> {
    let mut current = base.to_path_buf();
    for segment in name.split('/').map(str::trim).filter(|s| !s.is_empty()) {
        current.push(segment);
        ensure_dir(&current)?;
    }
    Ok(current)
}

/// `create_dir_all` with the path attached to the error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_steps() {
        assert_eq!(sanitize_filename("Game Interpreter"), "Game_Interpreter");
        assert_eq!(sanitize_filename("a\tb\r\nc"), "abc");
        assert_eq!(sanitize_filename("What? <Yes>|No"), "What_Yes_No");
        assert_eq!(sanitize_filename("  a   b  "), "a_b");
        assert_eq!(sanitize_filename("dir/sub\\file:name"), "dir_sub_file_name");
        assert_eq!(sanitize_filename("__x__"), "x");
        assert_eq!(sanitize_filename("Main"), "Main");
        assert_eq!(sanitize_filename("日本語 スクリプト"), "日本語_スクリプト");
    }

    #[test]
    fn test_sanitize_removes_breaks_before_collapsing() {
        assert_eq!(sanitize_filename("a _\n_ b"), "a_b");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for name in ["/ \\ : * ? \" < > |", "   ", "*a*", "x y/z", "_ _ _", "a\n \tb"] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once, "input {name:?}");
        }
    }

    #[test]
    fn test_fallback_for_empty() {
        assert_eq!(sanitize_filename("**??"), "");
        assert_eq!(sanitize_or_fallback("**??"), UNNAMED);
        assert_eq!(sanitize_or_fallback("ok"), "ok");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("out\\1_Group\\2_Foo.rb"), "out/1_Group/2_Foo.rb");
    }

    #[test]
    fn test_create_directory_structure() {
        let dir = tempdir().unwrap();
        let path = create_directory_structure(dir.path(), "1_A / B/ C ").unwrap();
        assert_eq!(path, dir.path().join("1_A").join("B").join("C"));
        assert!(path.is_dir());

        // Re-running over existing directories succeeds
        let again = create_directory_structure(dir.path(), "1_A/B/C").unwrap();
        assert_eq!(again, path);
    }

    #[test]
    fn test_create_directory_structure_skips_empty_segments() {
        let dir = tempdir().unwrap();
        let path = create_directory_structure(dir.path(), "x//y/").unwrap();
        assert_eq!(path, dir.path().join("x").join("y"));
    }

    #[test]
    fn test_create_directory_fails_under_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file"), b"").unwrap();
        let err = create_directory_structure(dir.path(), "file/sub").unwrap_err();
        assert!(matches!(err, Error::CreateDirectory { .. }));
    }
}
