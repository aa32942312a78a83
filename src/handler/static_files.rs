//! Static file serving
//!
//! Serves the dashboard files from the server root. Path resolution
//! canonicalizes both sides and rejects anything that escapes the root,
//! so traversal sequences in the URL cannot reach other files.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve a static file for the given URL path, or 404.
pub async fn serve(
    root: &str,
    path: &str,
    index_files: &[String],
    is_head: bool,
    access_log: bool,
) -> Response<Full<Bytes>> {
    match load_from_root(root, path, index_files).await {
        Some((content, content_type)) => {
            if access_log {
                logger::log_response(200, content.len());
            }
            http::response::build_static_file_response(content, content_type, is_head)
        }
        None => http::build_404_response(),
    }
}

/// Strip the leading slash and any traversal sequences from a URL path.
pub fn sanitize_url_path(path: &str) -> String {
    path.trim_start_matches('/').replace("..", "")
}

/// Load a file from the root directory, resolving directories through
/// the configured index files.
pub async fn load_from_root(
    root: &str,
    path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let relative_path = sanitize_url_path(path);
    let mut file_path = Path::new(root).join(&relative_path);

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{root}': {e}"
            ));
            return None;
        }
    };

    // Directory requests resolve through index files
    if file_path.is_dir() || relative_path.is_empty() || relative_path.ends_with('/') {
        for index_file in index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    // File not found is the routine 404 case, not worth a warning
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    #[test]
    fn test_sanitize_strips_traversal() {
        assert_eq!(sanitize_url_path("/index.html"), "index.html");
        assert_eq!(sanitize_url_path("/../etc/passwd"), "/etc/passwd");
        assert_eq!(sanitize_url_path("/a/../../b"), "a///b");
        assert_eq!(sanitize_url_path("/"), "");
    }

    fn make_test_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("yakima-static-test-{name}"));
        let _ = std_fs::remove_dir_all(&root);
        std_fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn test_serves_existing_file_with_content_type() {
        let root = make_test_root("serve");
        std_fs::write(root.join("dashboard.css"), "body { margin: 0 }").unwrap();

        let (content, content_type) =
            load_from_root(root.to_str().unwrap(), "/dashboard.css", &[])
                .await
                .expect("file should be served");
        assert_eq!(content, b"body { margin: 0 }");
        assert_eq!(content_type, "text/css");
    }

    #[tokio::test]
    async fn test_root_path_resolves_index_file() {
        let root = make_test_root("index");
        std_fs::write(root.join("index.html"), "<html></html>").unwrap();

        let index_files = vec!["index.html".to_string()];
        let (content, content_type) =
            load_from_root(root.to_str().unwrap(), "/", &index_files)
                .await
                .expect("index should resolve");
        assert_eq!(content, b"<html></html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let root = make_test_root("missing");
        assert!(
            load_from_root(root.to_str().unwrap(), "/nope.html", &[])
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_traversal_cannot_escape_root() {
        let root = make_test_root("traversal");
        std_fs::create_dir_all(root.join("inner")).unwrap();
        std_fs::write(root.join("secret.txt"), "outside").unwrap();

        let inner = root.join("inner");
        assert!(
            load_from_root(inner.to_str().unwrap(), "/../secret.txt", &[])
                .await
                .is_none()
        );
    }
}
