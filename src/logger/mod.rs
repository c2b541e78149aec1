//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Startup banner and shutdown
//! - One timestamped line per request and per outcome
//! - Optional access log with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::Level;

use crate::config::Config;
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        Level::parse(&config.logging.level),
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_warning(message: &str) {
    match writer::get() {
        Some(w) => w.write_warning(message),
        None => eprintln!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("┌───────────────────────────────────────────┐");
    write_info("│  pkgserve static asset server             │");
    write_info("└───────────────────────────────────────────┘");
    write_info(&format!("Running at http://{addr}/"));
    write_info(&format!("Site root: {}", config.site.root));
    write_info(&format!(
        "Mode: {} (index: {}, assets: {} -> {})",
        config.site.mode.as_str(),
        config.site.index_file,
        config.site.asset_prefix,
        config.site.asset_dir
    ));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Press Ctrl+C to stop\n");
}

/// `[time] METHOD /uri`
pub fn log_request(time: &DateTime<Utc>, method: &str, uri: &str) {
    write_info(&format::request_line(time, method, uri));
}

pub fn log_served(time: &DateTime<Utc>, path: &Path, bytes: usize) {
    write_info(&format::served_line(time, path, bytes));
}

pub fn log_not_found(time: &DateTime<Utc>, path: &Path) {
    write_error(&format::not_found_line(time, path));
}

pub fn log_server_error(time: &DateTime<Utc>, code: &str, path: &Path) {
    write_error(&format::server_error_line(time, code, path));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_warning(&format!("[WARN] {message}"));
}

/// Formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_port_in_use(port: u16) {
    write_error(&format!(
        "Port {port} is already in use. Try a different port."
    ));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[SIGNAL] {signal} received, shutting down"));
}
