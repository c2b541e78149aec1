//! pkgserve
//!
//! Static asset server for single-page web applications: maps request paths
//! onto files, types them by extension and falls back to the index document
//! for unresolved paths.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
