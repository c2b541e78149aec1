// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Component, Path};

use hyper::header::HeaderValue;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServeMode, ServerConfig, SiteConfig,
    DEFAULT_PORT,
};

/// Config file looked up when `-c` is not given
pub const DEFAULT_CONFIG_PATH: &str = "pkgserve";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources, lowest priority first: built-in defaults, the file (if present),
    /// `PKGSERVE_*` environment variables (`PKGSERVE_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("site.root", ".")?
            .set_default("site.index_file", "index.html")?
            .set_default("site.asset_prefix", "/pkg/")?
            .set_default("site.asset_dir", "pkg")?
            .set_default("site.favicon_path", "/favicon.ico")?
            .set_default("site.mode", "spa")?
            .set_default("http.asset_max_age", 86_400)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PKGSERVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject layouts the responder cannot resolve paths against
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port must be non-zero"));
        }
        let prefix = &self.site.asset_prefix;
        if !prefix.starts_with('/') || !prefix.ends_with('/') || prefix.len() < 2 {
            return Err(invalid(&format!(
                "site.asset_prefix must look like '/name/', got '{prefix}'"
            )));
        }
        let components: Vec<_> = Path::new(&self.site.index_file).components().collect();
        if !matches!(components.as_slice(), [Component::Normal(_)]) {
            return Err(invalid(&format!(
                "site.index_file must be a plain file name, got '{}'",
                self.site.index_file
            )));
        }
        if !self.site.favicon_path.starts_with('/') {
            return Err(invalid("site.favicon_path must start with '/'"));
        }
        if let Some((ext, _)) = self.mime.iter().find(|(ext, ty)| ext.is_empty() || ty.is_empty()) {
            return Err(invalid(&format!("empty mime entry for extension '{ext}'")));
        }
        if let Some((ext, ty)) = self
            .mime
            .iter()
            .find(|(_, ty)| HeaderValue::from_str(ty).is_err())
        {
            return Err(invalid(&format!(
                "mime type for extension '{ext}' is not a valid header value: {ty:?}"
            )));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| StartupError::InvalidAddress { addr })
    }
}

fn invalid(message: &str) -> config::ConfigError {
    config::ConfigError::Message(message.to_string())
}
