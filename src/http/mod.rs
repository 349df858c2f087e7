//! HTTP protocol layer module
//!
//! Content-type inference and response building, decoupled from the
//! request handling logic.

pub mod mime;
pub mod response;

// Re-export commonly used items
pub use response::{build_not_found_response, ResponseBody};
