// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Port used when nothing else is configured
pub const DEFAULT_PORT: u16 = 8080;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    /// Extra or overriding MIME entries, keyed by extension (leading dot optional)
    #[serde(default)]
    pub mime: HashMap<String, String>,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// How unresolved paths and cross-origin requests are treated
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    /// Missing files answer 404, no CORS handling
    Simple,
    /// Missing files fall back to the index document, CORS on every response
    Spa,
}

impl ServeMode {
    pub const fn is_spa(self) -> bool {
        matches!(self, Self::Spa)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Spa => "spa",
        }
    }
}

/// File system layout being served
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory request paths are resolved against
    pub root: String,
    /// Root document, served for `/` and as the SPA fallback
    pub index_file: String,
    /// URL prefix mapped onto `asset_dir`, e.g. `/pkg/`
    pub asset_prefix: String,
    /// Directory under `root` holding the assets behind `asset_prefix`
    pub asset_dir: String,
    /// Path that never falls back to the index document
    pub favicon_path: String,
    pub mode: ServeMode,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` header, omitted when unset
    #[serde(default)]
    pub server_name: Option<String>,
    /// `max-age` applied to non-HTML files in spa mode
    pub asset_max_age: u32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a connection may take to send its request headers (0 disables)
    pub header_read_timeout: u64,
    pub max_connections: Option<u64>,
}
