//! HTTP cache control module
//!
//! Chooses the `Cache-Control` value for a served file.

use crate::config::ServeMode;
use std::path::Path;

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Cacheable for the given number of seconds
    MaxAge(u32),
    /// Revalidate on every use
    NoCache,
}

impl CachePolicy {
    /// Policy for a file served with status 200
    ///
    /// HTML is never cached; in spa mode everything else gets `asset_max_age`,
    /// in simple mode every file carries the same `no-cache` header.
    pub fn for_file(mode: ServeMode, path: &Path, asset_max_age: u32) -> Self {
        let is_html = path.extension().is_some_and(|ext| ext == "html");
        if mode.is_spa() && !is_html {
            Self::MaxAge(asset_max_age)
        } else {
            Self::NoCache
        }
    }

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::MaxAge(max_age) => format!("max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}
