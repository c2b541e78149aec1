//! Request path resolution
//!
//! Turns a request path into a file system path beneath the site root.

use crate::config::SiteConfig;
use crate::error::ServeError;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Resolve `request_path` (no query string) against the site layout
///
/// * `/` becomes the index document.
/// * Paths under the asset prefix are rewritten into the asset directory.
/// * Everything else is taken relative to the site root.
///
/// A `..` segment is rejected with [`ServeError::Forbidden`].
pub fn resolve_path(site: &SiteConfig, request_path: &str) -> Result<PathBuf, ServeError> {
    let root = Path::new(&site.root);

    if request_path == "/" {
        return Ok(index_path(site));
    }

    let (base, rest) = match request_path.strip_prefix(site.asset_prefix.as_str()) {
        Some(rest) => (root.join(&site.asset_dir), rest),
        None => (root.to_path_buf(), request_path),
    };

    let relative = relative_segments(rest).ok_or_else(|| ServeError::Forbidden {
        request_path: request_path.to_string(),
    })?;

    Ok(base.join(relative))
}

/// Location of the root index document
pub fn index_path(site: &SiteConfig) -> PathBuf {
    Path::new(&site.root).join(&site.index_file)
}

/// Decode and re-assemble the path segments, `None` on a parent reference
fn relative_segments(path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') => return None,
            s => relative.push(s),
        }
    }
    Some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServeMode;

    fn site() -> SiteConfig {
        SiteConfig {
            root: "./public".to_string(),
            index_file: "index.html".to_string(),
            asset_prefix: "/pkg/".to_string(),
            asset_dir: "wasm-out".to_string(),
            favicon_path: "/favicon.ico".to_string(),
            mode: ServeMode::Spa,
        }
    }

    #[test]
    fn test_root_is_index() {
        assert_eq!(
            resolve_path(&site(), "/").unwrap(),
            PathBuf::from("./public/index.html")
        );
    }

    #[test]
    fn test_asset_prefix_rewrite() {
        assert_eq!(
            resolve_path(&site(), "/pkg/app_bg.wasm").unwrap(),
            PathBuf::from("./public/wasm-out/app_bg.wasm")
        );
        // without the trailing slash it is not the asset prefix
        assert_eq!(
            resolve_path(&site(), "/pkg").unwrap(),
            PathBuf::from("./public/pkg")
        );
    }

    #[test]
    fn test_plain_path() {
        assert_eq!(
            resolve_path(&site(), "/css/site.css").unwrap(),
            PathBuf::from("./public/css/site.css")
        );
        assert_eq!(
            resolve_path(&site(), "/a//./b.txt").unwrap(),
            PathBuf::from("./public/a/b.txt")
        );
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            resolve_path(&site(), "/my%20notes.txt").unwrap(),
            PathBuf::from("./public/my notes.txt")
        );
    }

    #[test]
    fn test_traversal_rejected() {
        for path in ["/../secret", "/pkg/../../etc/passwd", "/%2e%2e/secret", "/a/..%2f..%2fb", "/a\\..\\b"] {
            let result = resolve_path(&site(), path);
            assert!(
                matches!(result, Err(ServeError::Forbidden { .. })),
                "expected {path} to be rejected"
            );
        }
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path(&site()), PathBuf::from("./public/index.html"));
    }
}
