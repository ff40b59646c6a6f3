//! Error types for resource declaration.
//!
//! This module contains the errors raised while declaring resources and
//! building the route table. Request-time failures live in
//! [`rest::PerformError`](crate::rest::PerformError).
//!
//! # Error Handling
//!
//! Option builders return `Result<T, ConfigError>` so that invalid key names
//! or content types are rejected once, at declaration time. Errors recorded
//! while running declaration blocks are reported by
//! [`RestApi::build`](crate::RestApi::build).
//!
//! # Example
//!
//! ```rust
//! use rest_resources::{ConfigError, KeyName};
//!
//! let result = KeyName::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidKeyName { .. })));
//! ```

use thiserror::Error;

use crate::http::HttpMethod;

/// Errors that can occur while declaring resources.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A resource was declared with an empty path.
    #[error("Resource path cannot be empty. Please provide a path segment such as 'posts'.")]
    EmptyResourcePath,

    /// A resource path could not be turned into a route pattern.
    #[error("Invalid resource path '{path}': {reason}.")]
    InvalidResourcePath {
        /// The declared path.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// A primary or parent key name is invalid.
    #[error("Invalid key name '{name}'. Key names must be non-empty and contain no whitespace.")]
    InvalidKeyName {
        /// The rejected key name.
        name: String,
    },

    /// Content type is not a valid media type.
    #[error("Invalid content type '{content_type}'. Expected format: 'type/subtype' (e.g., 'application/json').")]
    InvalidContentType {
        /// The rejected content type.
        content_type: String,
    },

    /// A route name does not name one of the seven resource routes.
    #[error("Unknown route '{name}'. Expected one of: index, show, create, update, destroy, edit, new.")]
    UnknownRoute {
        /// The unrecognized route name.
        name: String,
    },

    /// Subdomain is invalid.
    #[error("Invalid subdomain '{subdomain}'. Expected letters, digits, '-' and '.' only (e.g., 'api').")]
    InvalidSubdomain {
        /// The rejected subdomain.
        subdomain: String,
    },

    /// Two resources registered the same verb and path, or paths the router
    /// cannot tell apart.
    #[error("Route conflict: {method} {path} is registered more than once.")]
    RouteConflict {
        /// The conflicting HTTP method.
        method: HttpMethod,
        /// The conflicting route pattern.
        path: String,
    },
}
