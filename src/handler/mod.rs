//! Request handler module
//!
//! Maps a request path onto a file below the site root and answers with it,
//! the index document fallback, or an error status.

pub mod resolve;
pub mod router;
pub mod static_files;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main entry point
pub use router::handle_request;
