// Application state module
// Immutable state shared by every connection

use super::types::Config;
use crate::http::MimeTable;

/// Application state
///
/// Built once before the accept loop starts and only read afterwards.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub mime: MimeTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mime = MimeTable::with_overrides(&config.mime);
        Self { config, mime }
    }
}
