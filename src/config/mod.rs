//! Configuration types for resource routing.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: Process-level settings (development mode)
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`ResourceOptions`]: Options of a single resource declaration
//! - [`ApiScope`]: Options of an `api` scope (path prefix, subdomain)
//! - [`KeyName`], [`MediaType`], [`Subdomain`]: Validated newtypes
//!
//! # Example
//!
//! ```rust
//! use rest_resources::ApiConfig;
//!
//! let config = ApiConfig::builder().development(true).build();
//! assert!(config.is_development());
//! ```

mod newtypes;
mod options;

pub use newtypes::{KeyName, MediaType, Subdomain};
pub use options::{ApiScope, ApiScopeBuilder, ResourceOptions, ResourceOptionsBuilder};

use serde::{Deserialize, Serialize};

/// Environment variable read by [`ApiConfig::from_env`].
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Configuration shared by every route of an API.
///
/// The only setting is the development-mode flag. In development mode,
/// callback failures are surfaced as `500` responses carrying the error
/// text; otherwise they become a bare `422` (save) or `404` (everything
/// else).
///
/// # Thread Safety
///
/// `ApiConfig` is `Copy`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use rest_resources::ApiConfig;
///
/// let config = ApiConfig::from_environment_name("development");
/// assert!(config.is_development());
///
/// let config = ApiConfig::from_environment_name("production");
/// assert!(!config.is_development());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    development: bool,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Reads the environment name from [`ENVIRONMENT_VAR`].
    ///
    /// A missing variable means production.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .map_or_else(|_| Self::default(), |name| Self::from_environment_name(&name))
    }

    /// Creates a configuration from an environment name.
    ///
    /// Only `"development"` (case-insensitive) enables development mode.
    #[must_use]
    pub fn from_environment_name(name: &str) -> Self {
        Self {
            development: name.trim().eq_ignore_ascii_case("development"),
        }
    }

    /// Returns whether callback failures are surfaced with full detail.
    #[must_use]
    pub const fn is_development(&self) -> bool {
        self.development
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
    assert_send_sync::<ResourceOptions>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// # Defaults
///
/// - `development`: `false`
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    development: Option<bool>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets development mode.
    #[must_use]
    pub const fn development(mut self, development: bool) -> Self {
        self.development = Some(development);
        self
    }

    /// Builds the [`ApiConfig`].
    #[must_use]
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            development: self.development.unwrap_or(false),
        }
    }
}
