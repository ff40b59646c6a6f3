//! Argument assembly and callback dispatch.
//!
//! [`perform`] turns a request into a callback invocation:
//!
//! 1. `save` parses the body as a JSON object; every other callback starts
//!    from the query parameters.
//! 2. An identifier, if given, is stored under the resource's primary key.
//! 3. The first capture of the request, if any, is stored under the
//!    resource's parent key.
//! 4. The callback is invoked with the document.
//! 5. Failures set the response status to `422` (save) or `404` (anything
//!    else) and are swallowed, unless development mode is on, in which case
//!    they are returned to the caller.
//!
//! Captures come from the request-scoped [`RequestContext`], so concurrent
//! requests against the same resource never see each other's values.

use axum::extract::Query;
use axum::http::Uri;
use serde_json::Value;

use crate::http::{RequestContext, ResponseParts};
use crate::rest::errors::PerformError;
use crate::rest::resource::{Callback, Document, Resource};

/// Builds the argument document for `callback`.
///
/// # Errors
///
/// Returns [`PerformError::MalformedInput`] when the body of a `save` is not
/// a JSON object or the query string cannot be decoded.
pub fn build_document(
    resource: &Resource,
    request: &RequestContext,
    callback: Callback,
    id: Option<&str>,
) -> Result<Document, PerformError> {
    let mut document = match callback {
        Callback::Save => parse_body(request.body(), callback)?,
        Callback::List | Callback::One | Callback::Delete => {
            parse_query(request.uri(), callback)?
        }
    };

    if let Some(id) = id {
        document.insert(resource.primary_key().to_string(), Value::from(id));
    }
    if let Some(parent) = request.captures().first() {
        document.insert(resource.parent_key().to_string(), Value::from(parent.as_str()));
    }

    Ok(document)
}

/// Dispatches a request to one of the resource's callbacks.
///
/// Returns `Ok(Some(value))` with the callback result, or `Ok(None)` when
/// the failure was converted into a status code on `response`.
///
/// # Errors
///
/// Only in development mode: returns the [`PerformError`] unchanged so the
/// caller can surface it.
pub fn perform(
    resource: &Resource,
    request: &RequestContext,
    response: &mut ResponseParts,
    development: bool,
    callback: Callback,
    id: Option<&str>,
) -> Result<Option<Value>, PerformError> {
    let result = build_document(resource, request, callback, id).and_then(|document| {
        resource
            .callback(callback)
            .invoke(resource.path(), callback, document)
    });

    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if development => Err(error),
        Err(error) => {
            let status = error.status();
            tracing::debug!(
                resource = resource.path(),
                callback = %callback,
                status = status.as_u16(),
                error = %error,
                "resource callback failed"
            );
            response.set_status(status);
            Ok(None)
        }
    }
}

fn parse_body(body: &[u8], callback: Callback) -> Result<Document, PerformError> {
    let malformed = |reason: String| PerformError::MalformedInput { callback, reason };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(malformed("request body must be a JSON object".to_string())),
        Err(e) => Err(malformed(e.to_string())),
    }
}

/// Decodes the query string as form data. Repeated keys keep the last value.
fn parse_query(uri: &Uri, callback: Callback) -> Result<Document, PerformError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|rejection| {
        PerformError::MalformedInput {
            callback,
            reason: rejection.body_text(),
        }
    })?;

    Ok(pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect())
}

/// Everything a route handler sees while serving one request.
///
/// Default handlers call [`RouteContext::perform`] with the route's callback
/// and identifier. Custom handlers get the same context and may inspect the
/// request, change the response status or headers, call `perform`
/// themselves, or return a value directly.
#[derive(Debug)]
pub struct RouteContext<'a> {
    resource: &'a Resource,
    request: &'a RequestContext,
    response: ResponseParts,
    development: bool,
    id: Option<String>,
}

impl<'a> RouteContext<'a> {
    /// Creates a context for one request.
    #[must_use]
    pub fn new(
        resource: &'a Resource,
        request: &'a RequestContext,
        development: bool,
        id: Option<String>,
    ) -> Self {
        Self {
            resource,
            request,
            response: ResponseParts::new(),
            development,
            id,
        }
    }

    /// Returns the resource the route belongs to.
    #[must_use]
    pub const fn resource(&self) -> &'a Resource {
        self.resource
    }

    /// Returns the request.
    #[must_use]
    pub const fn request(&self) -> &'a RequestContext {
        self.request
    }

    /// Returns the identifier captured for item routes (`"new"` for `new`).
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the response status and headers.
    #[must_use]
    pub const fn response(&self) -> &ResponseParts {
        &self.response
    }

    /// Returns the response status and headers for modification.
    pub fn response_mut(&mut self) -> &mut ResponseParts {
        &mut self.response
    }

    /// Runs [`perform`] against this context's resource and request.
    ///
    /// # Errors
    ///
    /// Only in development mode, see [`perform`].
    pub fn perform(
        &mut self,
        callback: Callback,
        id: Option<&str>,
    ) -> Result<Option<Value>, PerformError> {
        perform(
            self.resource,
            self.request,
            &mut self.response,
            self.development,
            callback,
            id,
        )
    }

    /// Consumes the context, returning the response parts.
    #[must_use]
    pub fn into_response_parts(self) -> ResponseParts {
        self.response
    }
}
