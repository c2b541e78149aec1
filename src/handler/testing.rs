//! Throwaway site directories for handler tests

use crate::config::{AppState, Config, ServeMode};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// A site root under the system temp dir, removed on drop
pub struct TestSite {
    root: PathBuf,
}

impl TestSite {
    pub fn new(name: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "pkgserve-{name}-{}-{id}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn write(&self, relative: &str, contents: &[u8]) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Default configuration pointed at this site
    pub fn state(&self, mode: ServeMode) -> AppState {
        let mut config = Config::load_from("pkgserve-test-no-such-config").unwrap();
        config.site.root = self.root.to_string_lossy().into_owned();
        config.site.mode = mode;
        AppState::new(config)
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
