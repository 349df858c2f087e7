//! HTTP response building module
//!
//! One builder per status the server can produce: a streamed 200 and a
//! bare 404.

use futures_util::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::Response;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::logger;

/// Body type shared by streamed 200s and empty 404s.
pub type ResponseBody = BoxBody<Bytes, std::io::Error>;

/// Build a 200 response streaming `file` in offset order.
///
/// `len` comes from file metadata captured during validation and becomes
/// the Content-Length header. A read error mid-stream surfaces through
/// the body after headers are already on the wire, terminating that one
/// response.
pub fn build_file_response(
    file: File,
    len: u64,
    content_type: &'static str,
) -> Response<ResponseBody> {
    let stream = ReaderStream::new(file);
    let body = StreamBody::new(stream.map_ok(Frame::data)).boxed();

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", len)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(empty_body())
        })
}

/// Build 404 Not Found response with an empty body
pub fn build_not_found_response() -> Response<ResponseBody> {
    Response::builder()
        .status(404)
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(empty_body())
        })
}

fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed()
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
