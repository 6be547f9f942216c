//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE, request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Password fields in JSON request bodies are redacted.
///
/// Bodies are passed on byte for byte; only the logged copy is decoded.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let body_text = String::from_utf8_lossy(&body_bytes);
    if is_json(parts.headers.get(CONTENT_TYPE)) {
        log_request(&parts, &redact_password(&body_text));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes: Bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_json(content_type: Option<&HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// Replace the value of any top-level "password" field in a JSON object.
fn redact_password(json_text: &str) -> String {
    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(json_text) else {
        return json_text.to_string();
    };

    match object.get_mut("password") {
        Some(password) => {
            *password = Value::String("********".to_owned());
            Value::Object(object).to_string()
        }
        None => json_text.to_string(),
    }
}

/// Bodies longer than this many bytes are truncated in the `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(body: &str) -> &str {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return body;
    }

    let end = (0..=LOG_BODY_LENGTH_LIMIT)
        .rev()
        .find(|index| body.is_char_boundary(*index))
        .unwrap_or(0);

    &body[..end]
}

fn log_request(headers: &request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {:}...",
            headers.method,
            headers.uri,
            truncate(body)
        );
        tracing::debug!("Full request: {headers:#?}\nbody: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            headers.method,
            headers.uri
        );
    }
}

fn log_response(headers: &response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {:}...",
            headers.status,
            truncate(body)
        );
        tracing::debug!("Full response: {headers:#?}\nbody: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", headers.status);
    }
}
