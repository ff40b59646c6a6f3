//! Request-time error types for resource dispatch.
//!
//! # Error Handling
//!
//! Every failure raised while assembling arguments or running a callback is a
//! [`PerformError`]. Dispatch maps them to a status code without a body:
//!
//! - **save** (`create`, `update`): `422 Unprocessable Entity`
//! - **list, one, delete**: `404 Not Found`
//!
//! In development mode the error is returned to the route handler instead and
//! rendered as a `500` with the error text.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use rest_resources::rest::{Callback, PerformError};
//!
//! let error = PerformError::MalformedInput {
//!     callback: Callback::Save,
//!     reason: "expected value at line 1 column 1".to_string(),
//! };
//! assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
//! ```

use axum::http::StatusCode;
use thiserror::Error;

use crate::rest::resource::{Callback, CallbackError};

/// A failure while dispatching a request to a callback.
#[derive(Debug, Error)]
pub enum PerformError {
    /// The callback slot was never registered.
    #[error("{callback} is not implemented for resource '{resource}'")]
    NotImplemented {
        /// The resource path.
        resource: String,
        /// The unregistered slot.
        callback: Callback,
    },

    /// The query string or request body could not be decoded.
    #[error("Malformed input for {callback}: {reason}")]
    MalformedInput {
        /// The callback the input was meant for.
        callback: Callback,
        /// What was wrong with the input.
        reason: String,
    },

    /// The application callback failed.
    #[error("{callback} callback failed: {source}")]
    Callback {
        /// The failing slot.
        callback: Callback,
        /// The error returned by the callback.
        source: CallbackError,
    },
}

impl PerformError {
    /// Returns the status code a failure of `callback` is reported with.
    #[must_use]
    pub const fn failure_status(callback: Callback) -> StatusCode {
        match callback {
            Callback::Save => StatusCode::UNPROCESSABLE_ENTITY,
            Callback::List | Callback::One | Callback::Delete => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the callback the failure belongs to.
    #[must_use]
    pub const fn callback(&self) -> Callback {
        match self {
            Self::NotImplemented { callback, .. }
            | Self::MalformedInput { callback, .. }
            | Self::Callback { callback, .. } => *callback,
        }
    }

    /// Returns the status code this failure is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        Self::failure_status(self.callback())
    }
}

/// A failure while rendering a callback result.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The resource serializer failed.
    #[error("Failed to serialize response for resource '{resource}': {source}")]
    Serialize {
        /// The resource path.
        resource: String,
        /// The serializer error.
        source: serde_json::Error,
    },
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PerformError>();
    assert_send_sync::<RenderError>();
};
