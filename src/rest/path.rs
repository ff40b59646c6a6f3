//! Path building for declared resources.
//!
//! This module turns a declared resource segment into router patterns. A
//! resource mounted at `P` answers on:
//!
//! - `P` and `P/` for `index` and `create`
//! - `P/{id_N}` for `show`, `update` and `destroy` (`P` for singletons)
//! - `P/{id_N}/edit` for `edit` (`P/edit` for singletons)
//! - `P/new` for `new`
//!
//! `N` is the nesting depth of the resource. A nested resource is mounted
//! under its parent's item capture, so the child of `posts` is mounted at
//! `/posts/{id_0}/comments` and the parent identifier becomes the child's
//! first capture. Using the depth in the capture name keeps the parameter
//! name identical between a parent's item routes and its children's mount
//! paths, which the router requires for patterns sharing a prefix.
//!
//! Item captures only match identifiers made of ASCII digits, so `P/abc`
//! and `P/abc/children` answer `404`. The router cannot constrain a capture,
//! so the check runs on every request, see [`is_identifier`].
//!
//! Declared segments may contain `:name` captures, which are rewritten to the
//! router's `{name}` syntax. They match any segment. Names of the form `id_N`
//! are reserved for item captures.
//!
//! # Example
//!
//! ```rust
//! use rest_resources::rest::{ResourcePath, ResourceRoute};
//!
//! let posts = ResourcePath::new("/api", "posts", 0, false, false, false).unwrap();
//! assert_eq!(posts.mount(), "/api/posts");
//! assert_eq!(posts.route_patterns(ResourceRoute::Show), ["/api/posts/{id_0}"]);
//!
//! let comments = ResourcePath::new(posts.mount(), "comments", 1, true, false, false).unwrap();
//! assert_eq!(comments.mount(), "/api/posts/{id_0}/comments");
//! assert_eq!(comments.captures(), ["id_0"]);
//! ```

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;

use crate::error::ConfigError;
use crate::http::HttpMethod;
use crate::rest::resource::Callback;

/// The seven routes a resource can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceRoute {
    /// List the collection (`GET P`).
    Index,
    /// Fetch one item (`GET P/{id}`).
    Show,
    /// Create an item (`POST P`).
    Create,
    /// Update an item (`PUT|PATCH P/{id}`).
    Update,
    /// Delete an item (`DELETE P/{id}`).
    Destroy,
    /// Fetch one item for editing (`GET P/{id}/edit`).
    Edit,
    /// Fetch the template of a new item (`GET P/new`).
    New,
}

impl ResourceRoute {
    /// All routes, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Index,
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Destroy,
        Self::Edit,
        Self::New,
    ];

    /// Routes activated by default on a singleton.
    pub const SINGLETON_DEFAULTS: [Self; 6] = [
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Destroy,
        Self::Edit,
        Self::New,
    ];

    /// Returns the routes activated when none were selected explicitly.
    ///
    /// Collections get all seven routes; singletons get everything but
    /// `index`.
    #[must_use]
    pub fn defaults(singleton: bool) -> Vec<Self> {
        let mut routes = Self::SINGLETON_DEFAULTS.to_vec();
        if !singleton {
            routes.push(Self::Index);
        }
        routes
    }

    /// Returns the HTTP methods the route answers to.
    #[must_use]
    pub const fn http_methods(&self) -> &'static [HttpMethod] {
        match self {
            Self::Index | Self::Show | Self::Edit | Self::New => &[HttpMethod::Get],
            Self::Create => &[HttpMethod::Post],
            Self::Update => &[HttpMethod::Put, HttpMethod::Patch],
            Self::Destroy => &[HttpMethod::Delete],
        }
    }

    /// Returns the callback the default handler dispatches to.
    #[must_use]
    pub const fn callback(&self) -> Callback {
        match self {
            Self::Index => Callback::List,
            Self::Show | Self::Edit | Self::New => Callback::One,
            Self::Create | Self::Update => Callback::Save,
            Self::Destroy => Callback::Delete,
        }
    }

    /// Returns the status set before the handler runs, if the route
    /// overrides the default `200 OK`.
    #[must_use]
    pub const fn success_status(&self) -> Option<StatusCode> {
        match self {
            Self::Create => Some(StatusCode::CREATED),
            Self::Destroy => Some(StatusCode::NO_CONTENT),
            _ => None,
        }
    }

    /// Returns `true` for routes addressing a single item by identifier.
    #[must_use]
    pub const fn is_item_route(&self) -> bool {
        matches!(self, Self::Show | Self::Update | Self::Destroy | Self::Edit)
    }

    /// Returns the route name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
            Self::Edit => "edit",
            Self::New => "new",
        }
    }
}

impl fmt::Display for ResourceRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceRoute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownRoute {
                name: s.to_string(),
            })
    }
}

/// Returns the name of the item capture of a resource at `depth`.
#[must_use]
pub fn item_capture_name(depth: usize) -> String {
    format!("id_{depth}")
}

/// Returns `true` if `name` has the form of an item capture (`id_<n>`).
#[must_use]
pub fn is_item_capture(name: &str) -> bool {
    name.strip_prefix("id_").is_some_and(is_identifier)
}

/// Returns `true` if `value` can fill an item capture: one or more ASCII
/// digits.
#[must_use]
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Router patterns computed for one declared resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segment: String,
    mount: String,
    captures: Vec<String>,
    item_capture: Option<String>,
}

impl ResourcePath {
    /// Computes the patterns of a resource.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Pattern of the enclosing scope (`""` at the root)
    /// * `declared` - The declared segment (`"posts"`, `":org/projects"`)
    /// * `depth` - Nesting depth of the resource (0 at the top level)
    /// * `nested` - Whether the resource is declared inside another resource
    /// * `bare` - Suppresses the parent-capture prefix
    /// * `singleton` - Omits the item capture
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyResourcePath`] for an empty segment and
    /// [`ConfigError::InvalidResourcePath`] for segments the router cannot
    /// represent.
    pub fn new(
        prefix: &str,
        declared: &str,
        depth: usize,
        nested: bool,
        bare: bool,
        singleton: bool,
    ) -> Result<Self, ConfigError> {
        let trimmed = declared.trim_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyResourcePath);
        }

        let segment = if nested && !bare {
            let parent_capture = item_capture_name(depth.saturating_sub(1));
            format!(":{parent_capture}/{trimmed}")
        } else {
            trimmed.to_string()
        };

        let (pattern, captures) = to_router_pattern(declared, &segment)?;
        if captures
            .iter()
            .any(|name| prefix.contains(&format!("{{{name}}}")))
        {
            return Err(ConfigError::InvalidResourcePath {
                path: declared.to_string(),
                reason: "capture name is already used by an enclosing scope",
            });
        }

        let generated = usize::from(nested && !bare);
        if captures.iter().skip(generated).any(|name| is_item_capture(name)) {
            return Err(ConfigError::InvalidResourcePath {
                path: declared.to_string(),
                reason: "capture names of the form 'id_N' are reserved",
            });
        }

        let item_capture = (!singleton).then(|| item_capture_name(depth));

        Ok(Self {
            segment,
            mount: format!("{}/{pattern}", prefix.trim_end_matches('/')),
            captures,
            item_capture,
        })
    }

    /// Returns the segment, including the parent-capture prefix when nested.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Returns the full pattern of the collection root.
    #[must_use]
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Returns the capture names introduced by the resource's own segment.
    #[must_use]
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Returns the item capture name, or `None` for singletons.
    #[must_use]
    pub fn item_capture(&self) -> Option<&str> {
        self.item_capture.as_deref()
    }

    /// Returns the item pattern, optionally followed by `suffix`.
    ///
    /// For singletons the item pattern is the collection root.
    #[must_use]
    pub fn item_pattern(&self, suffix: Option<&str>) -> String {
        let mut pattern = self.mount.clone();
        if let Some(item) = &self.item_capture {
            pattern.push_str("/{");
            pattern.push_str(item);
            pattern.push('}');
        }
        if let Some(suffix) = suffix {
            pattern.push('/');
            pattern.push_str(suffix);
        }
        pattern
    }

    /// Returns the patterns a route is registered on.
    #[must_use]
    pub fn route_patterns(&self, route: ResourceRoute) -> Vec<String> {
        let root = || vec![self.mount.clone(), format!("{}/", self.mount)];
        match route {
            ResourceRoute::Index | ResourceRoute::Create => root(),
            ResourceRoute::Show | ResourceRoute::Update | ResourceRoute::Destroy => {
                if self.item_capture.is_some() {
                    vec![self.item_pattern(None)]
                } else {
                    root()
                }
            }
            ResourceRoute::Edit => vec![self.item_pattern(Some("edit"))],
            ResourceRoute::New => vec![format!("{}/new", self.mount)],
        }
    }
}

/// Rewrites `:name` captures to `{name}` and collects the capture names.
fn to_router_pattern(declared: &str, segment: &str) -> Result<(String, Vec<String>), ConfigError> {
    let invalid = |reason| ConfigError::InvalidResourcePath {
        path: declared.to_string(),
        reason,
    };

    let mut parts = Vec::new();
    let mut captures = Vec::new();
    for part in segment.split('/') {
        if part.is_empty() {
            return Err(invalid("empty path segment"));
        }
        if part.contains(['{', '}', '*', '?', '#']) {
            return Err(invalid("segments may only contain literals and ':name' captures"));
        }
        if let Some(name) = part.strip_prefix(':') {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid("capture names must be alphanumeric"));
            }
            if captures.iter().any(|c| c == name) {
                return Err(invalid("duplicate capture name"));
            }
            captures.push(name.to_string());
            parts.push(format!("{{{name}}}"));
        } else {
            parts.push(part.to_string());
        }
    }

    Ok((parts.join("/"), captures))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceRoute>();
    assert_send_sync::<ResourcePath>();
};
