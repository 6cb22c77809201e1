// Request parsing utilities for HTTP handlers

use hyper::{Body, Response, StatusCode};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::response_helpers::{json_error, json_error_detail};

/// Parse JSON request body into a typed structure.
///
/// Returns the deserialized value on success, or an error Response on failure:
/// 400 when the body is unreadable or not JSON at all, 422 when the JSON is
/// well-formed but does not match `T` (missing field, wrong type).
///
/// # Example
/// ```ignore
/// let record: PatientRecord = match parse_json_body(req.into_body()).await {
///     Ok(record) => record,
///     Err(error_response) => return Ok(error_response),
/// };
/// ```
pub async fn parse_json_body<T: DeserializeOwned>(body: Body) -> Result<T, Response<Body>> {
    let body_bytes = match hyper::body::to_bytes(body).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("[REQUEST] Failed to read request body: {e}");
            return Err(json_error(StatusCode::BAD_REQUEST, "Failed to read request body"));
        }
    };

    if let Ok(body_str) = std::str::from_utf8(&body_bytes) {
        if !body_str.is_empty() {
            debug!("[REQUEST] Body: {body_str}");
        }
    }

    match serde_json::from_slice::<T>(&body_bytes) {
        Ok(parsed) => Ok(parsed),
        Err(e) if e.classify() == Category::Data => {
            warn!("[REQUEST] Schema validation error: {e}");
            Err(json_error_detail(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid patient record",
                &e.to_string(),
            ))
        }
        Err(e) => {
            warn!("[REQUEST] JSON parsing error: {e}");
            Err(json_error(StatusCode::BAD_REQUEST, "Invalid JSON format"))
        }
    }
}
