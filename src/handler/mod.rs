//! Request handling module
//!
//! Maps each request path to a file under the static root and streams it
//! back, or answers a bare 404. There is no method dispatch: every method
//! is handled identically, matching the development server this hosts
//! demo pages for.

mod resolve;

pub use resolve::{resolve_static_path, ResolvedFile};

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use hyper::{Request, Response};
use tokio::fs::File;

use crate::http::{self, mime};
use crate::logger;

/// Read-only state shared by every connection task.
pub struct HandlerState {
    pub static_root: PathBuf,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
///
/// Headers are only written after path validation succeeds; a read error
/// mid-stream surfaces through the response body and terminates that one
/// connection.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<HandlerState>,
) -> Result<Response<http::ResponseBody>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match resolve::resolve_static_path(&state.static_root, &path).await {
        Some(resolved) => match File::open(&resolved.path).await {
            Ok(file) => {
                let content_type =
                    mime::get_content_type(resolved.path.extension().and_then(|e| e.to_str()));
                http::response::build_file_response(file, resolved.len, content_type)
            }
            Err(e) => {
                // Validated a moment ago but gone now; a plain miss to the client
                logger::log_warning(&format!(
                    "Resolved file vanished before open '{}': {e}",
                    resolved.path.display()
                ));
                http::build_not_found_response()
            }
        },
        None => http::build_not_found_response(),
    };

    if state.access_log {
        logger::log_access(&method, &path, response.status().as_u16());
    }

    Ok(response)
}
