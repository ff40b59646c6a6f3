//! Rendering of callback results into HTTP responses.
//!
//! A result is rendered when it is present, neither `null` nor `false`, and
//! the status is not `204 No Content`. Rendering sets `Content-Type` to the resource's content
//! type and serializes the value with the resource's serializer. Anything
//! else produces an empty body with the status and headers accumulated so far.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::http::ResponseParts;
use crate::rest::errors::RenderError;
use crate::rest::resource::Resource;

/// Builds the response for a handler result.
///
/// # Errors
///
/// Returns [`RenderError::Serialize`] when the resource serializer fails.
pub fn render(
    resource: &Resource,
    parts: ResponseParts,
    value: Option<Value>,
) -> Result<Response, RenderError> {
    let (status, mut headers) = parts.into_parts();

    let body = match value {
        Some(value) if !is_falsy(&value) && status != StatusCode::NO_CONTENT => {
            let text =
                resource
                    .serialize_value(&value)
                    .map_err(|source| RenderError::Serialize {
                        resource: resource.path().to_string(),
                        source,
                    })?;
            headers.insert(CONTENT_TYPE, resource.content_type().clone());
            Body::from(text)
        }
        _ => Body::empty(),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

fn is_falsy(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false))
}

/// Builds a `500 Internal Server Error` carrying `error` as plain text.
///
/// Used for failures surfaced in development mode and for serializer
/// failures.
pub fn error_response(resource: &Resource, error: &dyn std::error::Error) -> Response {
    tracing::error!(resource = resource.path(), error = %error, "request failed");

    let mut response = Response::new(Body::from(error.to_string()));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
