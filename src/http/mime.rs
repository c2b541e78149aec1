//! MIME type detection module
//!
//! Maps a file extension (leading dot included) to a Content-Type.

use std::collections::HashMap;
use std::path::Path;

/// Content-Type used when the extension is missing or unknown
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Built-in entries
const DEFAULT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".js", "text/javascript"),
    (".css", "text/css"),
    (".json", "application/json"),
    (".wasm", "application/wasm"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".ico", "image/x-icon"),
];

/// Extension to Content-Type mapping, built once at startup and only read afterwards
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// Built-in table with `overrides` applied on top
    ///
    /// Override keys may be given with or without the leading dot.
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = Self::default();
        for (ext, content_type) in overrides {
            let key = if ext.starts_with('.') {
                ext.clone()
            } else {
                format!(".{ext}")
            };
            table.types.insert(key, content_type.clone());
        }
        table
    }

    /// Look up an extension such as `".wasm"`
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.types.get(extension).map(String::as_str)
    }

    /// Content-Type for a file path, falling back to `text/plain`
    ///
    /// # Examples
    /// ```
    /// use pkgserve::http::mime::MimeTable;
    /// use std::path::Path;
    ///
    /// let mime = MimeTable::default();
    /// assert_eq!(mime.content_type_for(Path::new("./pkg/app.wasm")), "application/wasm");
    /// assert_eq!(mime.content_type_for(Path::new("./notes")), "text/plain");
    /// ```
    pub fn content_type_for(&self, path: &Path) -> &str {
        extension_of(path)
            .and_then(|ext| self.get(&ext))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|(ext, ty)| ((*ext).to_string(), (*ty).to_string()))
                .collect(),
        }
    }
}

/// Final extension of `path` with its leading dot, e.g. `".js"`
///
/// Dotfiles such as `.env` have no extension.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
}
