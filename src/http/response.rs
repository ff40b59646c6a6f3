//! Mutable response metadata written by resource handlers.

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, StatusCode};

/// Status code and headers of the response being produced.
///
/// Route handlers set the success status before dispatching (`201` for
/// create, `204` for destroy); dispatch overwrites it with `422` or `404`
/// when the callback fails. The body is produced separately by content
/// negotiation.
#[derive(Clone, Debug)]
pub struct ResponseParts {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseParts {
    /// Creates response parts with status `200 OK` and no headers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    /// Returns the current status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Sets the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the response headers for modification.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Sets a header, replacing any previous value.
    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Splits into status and headers.
    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap) {
        (self.status, self.headers)
    }
}

impl Default for ResponseParts {
    fn default() -> Self {
        Self::new()
    }
}
