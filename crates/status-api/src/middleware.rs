//! Generic JSON body parsing applied to every request.
//!
//! Requests declaring a JSON `Content-Type` have their body buffered (up to a
//! size limit) and parsed before they reach the router. The parsed document is
//! attached to the request as a [`JsonBody`] extension and the buffered bytes
//! are put back as the request body, so handlers can use either.

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, Limited};

use crate::error::ApiError;

/// A request body that has already been parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub serde_json::Value);

/// Middleware entry point. The state is the body size limit in bytes.
pub async fn parse_json_body(State(limit): State<usize>, request: Request, next: Next) -> Response {
    if !is_json_content_type(request.headers()) {
        return next.run(request).await;
    }

    match buffer_json(request, limit).await {
        Ok(request) => next.run(request).await,
        Err(err) => {
            tracing::debug!(error = %err, "rejected JSON request body");
            err.into_response()
        }
    }
}

async fn buffer_json(request: Request, limit: usize) -> Result<Request, ApiError> {
    let (mut parts, body) = request.into_parts();

    // Short-circuit on the declared length before reading anything.
    if content_length(&parts.headers).is_some_and(|len| len > limit) {
        return Err(ApiError::PayloadTooLarge { limit });
    }

    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<http_body_util::LengthLimitError>().is_some() => {
            return Err(ApiError::PayloadTooLarge { limit });
        }
        Err(e) => return Err(ApiError::BodyRead(e.to_string())),
    };

    if !bytes.is_empty() {
        parts.extensions.insert(parse_strict(&bytes)?);
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Parses `bytes` as a JSON document whose top-level value is an object or an array.
pub fn parse_strict(bytes: &Bytes) -> Result<JsonBody, ApiError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedJson(e.to_string()))?;

    if !(value.is_object() || value.is_array()) {
        return Err(ApiError::UnsupportedJsonValue);
    }
    Ok(JsonBody(value))
}

/// `application/json` or any `application/*+json` media type.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return false;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json" || mime.suffix().is_some_and(|name| name == "json"))
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok()?.parse().ok())
}
