//! Per-declaration option structures.

use crate::config::newtypes::{KeyName, MediaType, Subdomain};
use crate::error::ConfigError;

const DEFAULT_PRIMARY_KEY: &str = "id";
const DEFAULT_PARENT_KEY: &str = "parent_id";
const DEFAULT_API_PATH: &str = "api";

/// Options for a single resource declaration.
///
/// # Defaults
///
/// - `bare`: `false` (nested resources are prefixed with the parent capture)
/// - `singleton`: `false`
/// - `primary_key`: `"id"`
/// - `parent_key`: `"parent_id"`
/// - `content_type`: `application/json`
///
/// # Example
///
/// ```rust
/// use rest_resources::ResourceOptions;
///
/// let options = ResourceOptions::builder()
///     .singleton(true)
///     .primary_key("slug")
///     .content_type("application/vnd.api+json")
///     .build()
///     .unwrap();
///
/// assert!(options.is_singleton());
/// assert_eq!(options.primary_key().as_ref(), "slug");
/// assert_eq!(options.parent_key().as_ref(), "parent_id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceOptions {
    bare: bool,
    singleton: bool,
    primary_key: KeyName,
    parent_key: KeyName,
    content_type: MediaType,
}

impl ResourceOptions {
    /// Creates a new builder for constructing `ResourceOptions`.
    #[must_use]
    pub fn builder() -> ResourceOptionsBuilder {
        ResourceOptionsBuilder::new()
    }

    /// Returns whether the parent-capture prefix is suppressed.
    #[must_use]
    pub const fn is_bare(&self) -> bool {
        self.bare
    }

    /// Returns whether the resource is a singleton.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// Returns the field name the item identifier is injected under.
    #[must_use]
    pub const fn primary_key(&self) -> &KeyName {
        &self.primary_key
    }

    /// Returns the field name the parent identifier is injected under.
    #[must_use]
    pub const fn parent_key(&self) -> &KeyName {
        &self.parent_key
    }

    /// Returns the content type of rendered responses.
    #[must_use]
    pub const fn content_type(&self) -> &MediaType {
        &self.content_type
    }
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            bare: false,
            singleton: false,
            primary_key: KeyName(DEFAULT_PRIMARY_KEY.to_string()),
            parent_key: KeyName(DEFAULT_PARENT_KEY.to_string()),
            content_type: MediaType::json(),
        }
    }
}

/// Builder for constructing [`ResourceOptions`] instances.
///
/// Key names and content type are validated once, in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ResourceOptionsBuilder {
    bare: bool,
    singleton: bool,
    primary_key: Option<String>,
    parent_key: Option<String>,
    content_type: Option<String>,
}

impl ResourceOptionsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the parent-capture prefix of a nested resource.
    #[must_use]
    pub const fn bare(mut self, bare: bool) -> Self {
        self.bare = bare;
        self
    }

    /// Declares the resource as a singleton (no index, no identifier segment).
    #[must_use]
    pub const fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    /// Sets the field name for the item identifier.
    #[must_use]
    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }

    /// Sets the field name for the parent identifier.
    #[must_use]
    pub fn parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = Some(key.into());
        self
    }

    /// Sets the response content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Builds the [`ResourceOptions`], validating key names and content type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKeyName`] or
    /// [`ConfigError::InvalidContentType`] for invalid values.
    pub fn build(self) -> Result<ResourceOptions, ConfigError> {
        let defaults = ResourceOptions::default();

        Ok(ResourceOptions {
            bare: self.bare,
            singleton: self.singleton,
            primary_key: self
                .primary_key
                .map_or(Ok(defaults.primary_key), KeyName::new)?,
            parent_key: self
                .parent_key
                .map_or(Ok(defaults.parent_key), KeyName::new)?,
            content_type: self
                .content_type
                .map_or(Ok(defaults.content_type), MediaType::new)?,
        })
    }
}

/// Options for an `api` scope.
///
/// An API scope mounts its block under a path prefix (default `"api"`) and
/// can restrict it to a subdomain.
///
/// # Example
///
/// ```rust
/// use rest_resources::ApiScope;
///
/// let scope = ApiScope::builder().path("rest").subdomain("api").build().unwrap();
/// assert_eq!(scope.path(), "rest");
/// assert_eq!(scope.subdomain().unwrap().as_ref(), "api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiScope {
    path: String,
    subdomain: Option<Subdomain>,
}

impl ApiScope {
    /// Creates a new builder for constructing an `ApiScope`.
    #[must_use]
    pub fn builder() -> ApiScopeBuilder {
        ApiScopeBuilder::default()
    }

    /// Returns the path prefix.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the subdomain restriction, if any.
    #[must_use]
    pub const fn subdomain(&self) -> Option<&Subdomain> {
        self.subdomain.as_ref()
    }
}

impl Default for ApiScope {
    fn default() -> Self {
        Self {
            path: DEFAULT_API_PATH.to_string(),
            subdomain: None,
        }
    }
}

/// Builder for constructing [`ApiScope`] instances.
#[derive(Debug, Default)]
pub struct ApiScopeBuilder {
    path: Option<String>,
    subdomain: Option<String>,
}

impl ApiScopeBuilder {
    /// Sets the path prefix (default `"api"`).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Restricts the scope to hosts under `subdomain`.
    #[must_use]
    pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// Builds the [`ApiScope`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSubdomain`] if the subdomain is invalid.
    pub fn build(self) -> Result<ApiScope, ConfigError> {
        Ok(ApiScope {
            path: self.path.unwrap_or_else(|| DEFAULT_API_PATH.to_string()),
            subdomain: self.subdomain.map(Subdomain::new).transpose()?,
        })
    }
}
