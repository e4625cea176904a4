use std::io::Cursor;
use tiny_http::Response;

use crate::routes::json_response;
use crate::state::AppState;

/// `GET /health`
pub fn handle(state: &AppState) -> Response<Cursor<Vec<u8>>> {
    let (h1, h2) = state.hidden;
    json_response(200, &serde_json::json!({ "status": "ok", "hidden": [h1, h2] }))
}
