use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use ferrite_digit::{recognize, DigitError, RawMask};

use crate::routes::{error_response, json_response};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /classify
// ---------------------------------------------------------------------------

/// Body: `{"rows": [[f64, ...], ...]}`.
pub fn handle_json(request: &mut Request, state: &AppState) -> Response<Cursor<Vec<u8>>> {
    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        return error_response(400, &format!("failed to read request body: {}", e));
    }
    match serde_json::from_slice::<RawMask>(&body) {
        Ok(mask) => run(&mask, state),
        Err(e) => error_response(400, &format!("invalid mask: {}", e)),
    }
}

// ---------------------------------------------------------------------------
// POST /classify/image
// ---------------------------------------------------------------------------

/// Body: raw image bytes; strokes light on a dark background.
pub fn handle_image(request: &mut Request, state: &AppState) -> Response<Cursor<Vec<u8>>> {
    let mut body = Vec::new();
    if let Err(e) = request.as_reader().read_to_end(&mut body) {
        return error_response(400, &format!("failed to read request body: {}", e));
    }
    match RawMask::from_image_bytes(&body) {
        Ok(mask) => run(&mask, state),
        Err(e) => error_response(400, &e.to_string()),
    }
}

fn run(mask: &RawMask, state: &AppState) -> Response<Cursor<Vec<u8>>> {
    match recognize(mask, &state.network) {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(body) => json_response(200, &body),
            Err(e) => error_response(500, &e.to_string()),
        },
        Err(DigitError::InputEmpty) => error_response(422, "no digit drawn"),
        Err(e) => {
            tracing::error!(error = %e, "classification failed");
            error_response(500, &e.to_string())
        }
    }
}
