//! Static path resolution
//!
//! A request path resolves to a servable file iff the canonicalized
//! candidate path stays under the canonicalized static root, exists, and
//! is a regular file. The original server only string-prefix-checked the
//! joined path; canonicalizing both sides first closes the `..`/symlink
//! traversal hole that check leaves open, at the cost of refusing
//! symlinks that point outside the root.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::logger;

/// A request path successfully resolved against the static root.
#[derive(Debug)]
pub struct ResolvedFile {
    /// Canonical absolute path of the file on disk.
    pub path: PathBuf,
    /// File length in bytes, used for the Content-Length header.
    pub len: u64,
}

/// Resolve `request_path` against `static_root`.
///
/// Returns `None` for anything that must 404: paths escaping the root,
/// missing files, and directories.
pub async fn resolve_static_path(static_root: &Path, request_path: &str) -> Option<ResolvedFile> {
    let relative = request_path.trim_start_matches('/');
    let candidate = static_root.join(relative);

    let root = match fs::canonicalize(static_root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{}': {e}",
                static_root.display()
            ));
            return None;
        }
    };

    // Missing files land here; an ordinary 404, not worth logging
    let Ok(path) = fs::canonicalize(&candidate).await else {
        return None;
    };

    if !path.starts_with(&root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            path.display()
        ));
        return None;
    }

    let metadata = fs::metadata(&path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    Some(ResolvedFile {
        path,
        len: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lay out `<tmp>/<tag>/public` with an index file, a nested asset,
    /// and a secret file OUTSIDE the root.
    fn temp_root(tag: &str) -> PathBuf {
        let base = std::env::temp_dir().join(format!(
            "statichost-resolve-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&base);
        let root = base.join("public");
        std::fs::create_dir_all(root.join("models")).unwrap();
        std::fs::write(root.join("index.html"), b"<html></html>").unwrap();
        std::fs::write(root.join("models/box.js"), b"export {};").unwrap();
        std::fs::write(base.join("secret.txt"), b"top secret").unwrap();
        root
    }

    #[tokio::test]
    async fn resolves_existing_file() {
        let root = temp_root("hit");
        let resolved = resolve_static_path(&root, "/index.html").await.unwrap();
        assert_eq!(resolved.len, 13);
        assert!(resolved.path.ends_with("index.html"));
    }

    #[tokio::test]
    async fn resolves_nested_file() {
        let root = temp_root("nested");
        let resolved = resolve_static_path(&root, "/models/box.js").await;
        assert!(resolved.is_some());
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let root = temp_root("miss");
        assert!(resolve_static_path(&root, "/nope.html").await.is_none());
    }

    #[tokio::test]
    async fn directory_is_none() {
        let root = temp_root("dir");
        // Exists on disk, but is not a regular file
        assert!(resolve_static_path(&root, "/models").await.is_none());
    }

    #[tokio::test]
    async fn dotdot_escape_is_none() {
        let root = temp_root("escape");
        // Canonicalizes to a real file one level above the root
        assert!(resolve_static_path(&root, "/../secret.txt").await.is_none());
    }

    #[tokio::test]
    async fn missing_root_is_none() {
        let root = PathBuf::from("/definitely/not/a/root");
        assert!(resolve_static_path(&root, "/index.html").await.is_none());
    }
}
