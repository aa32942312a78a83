//! Request handler module
//!
//! Request dispatch and the two responder branches: proxy forward and
//! static file serving.

pub mod proxy;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
