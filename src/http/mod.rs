//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from business logic.
//! Shared between the static file responder and the proxy forwarder.

pub mod mime;
pub mod response;

pub use response::{build_404_response, build_405_response};
