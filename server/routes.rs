use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response(status: u16, body: &serde_json::Value) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.to_string().into_bytes();
    let len = bytes.len();
    let mut headers = Vec::new();
    if let Ok(h) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        headers.push(h);
    }
    Response::new(StatusCode(status), headers, Cursor::new(bytes), Some(len), None)
}

pub fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    json_response(status, &serde_json::json!({ "error": message }))
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    error_response(404, "not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes a request to its handler and sends the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (method, path.as_str()) {
        (Method::Get,  "/health")         => handlers::health::handle(&state),
        (Method::Post, "/classify")       => handlers::classify::handle_json(&mut request, &state),
        (Method::Post, "/classify/image") => handlers::classify::handle_image(&mut request, &state),
        _ => not_found(),
    };

    tracing::debug!(%url, status = response.status_code().0, "handled request");
    if let Err(e) = request.respond(response) {
        tracing::warn!(error = %e, "failed to send response");
    }
}
