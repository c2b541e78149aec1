//! HTTP protocol layer module
//!
//! Content typing, cache policy and response builders, independent of how
//! a request path is resolved.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use mime::MimeTable;
pub use response::{
    apply_cors, apply_server_name, build_404_response, build_500_response,
    build_fallback_response, build_file_response, build_options_response,
};
