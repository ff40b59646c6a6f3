//! Request and response types seen by resource handlers.
//!
//! The router hands every matched request to a resource handler as a
//! [`RequestContext`]: the raw query string, the body bytes, the request
//! headers and the path captures that belong to the resource. Handlers write
//! their status code and headers into [`ResponseParts`].
//!
//! # Overview
//!
//! - [`HttpMethod`]: Verbs a resource route can be bound to
//! - [`RequestContext`]: Request-scoped input, including captures
//! - [`RequestContextBuilder`]: Builder for [`RequestContext`]
//! - [`ResponseParts`]: Mutable status and headers of the response
//!
//! Captures are carried per request and never stored on a resource, so any
//! number of requests can be in flight against the same resource.

mod request;
mod response;

pub use request::{HttpMethod, RequestContext, RequestContextBuilder};
pub use response::ResponseParts;
