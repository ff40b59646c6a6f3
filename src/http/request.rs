//! Request-scoped input for resource handlers.

use std::fmt;

use axum::body::Bytes;
use axum::http::{HeaderMap, Uri};
use axum::routing::MethodFilter;

/// HTTP methods a resource route can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the router filter matching this method.
    #[must_use]
    pub const fn method_filter(&self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
            Self::Put => MethodFilter::PUT,
            Self::Patch => MethodFilter::PATCH,
            Self::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of an inbound request a resource handler works with.
///
/// A `RequestContext` is built once per request. `captures` holds the values
/// of the path captures introduced by the resource's own mount segment, in
/// declaration order; for a nested resource the first capture is the parent
/// identifier.
///
/// # Example
///
/// ```rust
/// use axum::http::Uri;
/// use rest_resources::http::RequestContext;
///
/// let request = RequestContext::builder()
///     .uri(Uri::from_static("/posts/7/comments?limit=10"))
///     .body(r#"{"title":"Hello"}"#)
///     .capture("7")
///     .build();
///
/// assert_eq!(request.query(), Some("limit=10"));
/// assert_eq!(request.captures(), ["7".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    uri: Uri,
    body: Bytes,
    headers: HeaderMap,
    captures: Vec<String>,
}

impl RequestContext {
    /// Creates a new builder for constructing a `RequestContext`.
    #[must_use]
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Returns the request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the raw query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the raw request body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the captures extracted for the resource.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }
}

/// Builder for constructing [`RequestContext`] instances.
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    uri: Uri,
    body: Bytes,
    headers: HeaderMap,
    captures: Vec<String>,
}

impl RequestContextBuilder {
    /// Sets the request URI. Its query string feeds non-`save` callbacks.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the request headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets all captures at once.
    #[must_use]
    pub fn captures(mut self, captures: Vec<String>) -> Self {
        self.captures = captures;
        self
    }

    /// Appends a single capture.
    #[must_use]
    pub fn capture(mut self, value: impl Into<String>) -> Self {
        self.captures.push(value.into());
        self
    }

    /// Builds the [`RequestContext`].
    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext {
            uri: self.uri,
            body: self.body,
            headers: self.headers,
            captures: self.captures,
        }
    }
}

// Verify request types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpMethod>();
    assert_send_sync::<RequestContext>();
};
