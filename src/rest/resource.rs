//! The resource node: identity, callbacks, serializer and enabled routes.
//!
//! A [`Resource`] is configured inside its declaration block and then frozen
//! behind an `Arc` shared by all of its route handlers. Nothing about the
//! request being served is stored on it; captures travel in the
//! [`RequestContext`](crate::http::RequestContext).
//!
//! # Callbacks
//!
//! Each resource has four callback slots:
//!
//! | Slot     | Used by                           |
//! |----------|-----------------------------------|
//! | `list`   | `index`                           |
//! | `one`    | `show`, `edit`, `new`             |
//! | `save`   | `create`, `update`                |
//! | `delete` | `destroy`                         |
//!
//! A callback receives the argument [`Document`] and returns a JSON value or
//! fails with a [`CallbackError`]. Unset slots fail with
//! [`PerformError::NotImplemented`] when invoked.
//!
//! # Example
//!
//! ```rust
//! use rest_resources::rest::{Callback, Document, Resource, ResourcePath};
//! use rest_resources::ResourceOptions;
//! use serde_json::{json, Value};
//!
//! let path = ResourcePath::new("", "posts", 0, false, false, false).unwrap();
//! let mut posts = Resource::new(path, ResourceOptions::default());
//! posts.one(|args: Document| Ok(json!({ "id": args["id"] })));
//!
//! let mut args = Document::new();
//! args.insert("id".to_string(), Value::from("42"));
//! let value = posts.callback(Callback::One).invoke("posts", Callback::One, args).unwrap();
//! assert_eq!(value, json!({ "id": "42" }));
//! assert!(!posts.callback(Callback::Delete).is_registered());
//! ```

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderValue;
use serde_json::Value;

use crate::config::{KeyName, ResourceOptions};
use crate::rest::errors::PerformError;
use crate::rest::path::{ResourcePath, ResourceRoute};

/// The argument document passed to a callback.
pub type Document = serde_json::Map<String, Value>;

/// Failure returned by application callbacks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// A registered callback.
pub type CallbackFn = Arc<dyn Fn(Document) -> Result<Value, CallbackError> + Send + Sync>;

/// A response body serializer.
pub type SerializerFn = Arc<dyn Fn(&Value) -> Result<String, serde_json::Error> + Send + Sync>;

/// The four callback slots of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Lists the collection.
    List,
    /// Fetches one item.
    One,
    /// Creates or updates an item.
    Save,
    /// Deletes an item.
    Delete,
}

impl Callback {
    /// Returns the slot name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::One => "one",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content of a callback slot.
#[derive(Clone, Default)]
pub enum CallbackSlot {
    /// A callback was registered.
    Registered(CallbackFn),
    /// No callback was registered; invoking the slot fails.
    #[default]
    Unregistered,
}

impl CallbackSlot {
    /// Returns `true` if a callback was registered.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }

    /// Invokes the callback with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`PerformError::NotImplemented`] for an unregistered slot and
    /// [`PerformError::Callback`] when the callback fails.
    pub fn invoke(
        &self,
        resource: &str,
        callback: Callback,
        args: Document,
    ) -> Result<Value, PerformError> {
        match self {
            Self::Registered(handler) => {
                handler(args).map_err(|source| PerformError::Callback { callback, source })
            }
            Self::Unregistered => Err(PerformError::NotImplemented {
                resource: resource.to_string(),
                callback,
            }),
        }
    }
}

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(_) => f.write_str("Registered(..)"),
            Self::Unregistered => f.write_str("Unregistered"),
        }
    }
}

/// Serializes a callback result: strings verbatim, everything else as JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if the value cannot be encoded.
pub fn default_serializer(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other),
    }
}

/// One node of the declared resource tree.
pub struct Resource {
    path: ResourcePath,
    options: ResourceOptions,
    list: CallbackSlot,
    one: CallbackSlot,
    save: CallbackSlot,
    delete: CallbackSlot,
    serializer: Option<SerializerFn>,
    routes: Option<Vec<ResourceRoute>>,
}

impl Resource {
    /// Creates a resource with no callbacks and default routes.
    #[must_use]
    pub const fn new(path: ResourcePath, options: ResourceOptions) -> Self {
        Self {
            path,
            options,
            list: CallbackSlot::Unregistered,
            one: CallbackSlot::Unregistered,
            save: CallbackSlot::Unregistered,
            delete: CallbackSlot::Unregistered,
            serializer: None,
            routes: None,
        }
    }

    /// Returns the segment, including the parent-capture prefix when nested.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.segment()
    }

    /// Returns the computed router patterns.
    #[must_use]
    pub const fn resource_path(&self) -> &ResourcePath {
        &self.path
    }

    /// Returns the declaration options.
    #[must_use]
    pub const fn options(&self) -> &ResourceOptions {
        &self.options
    }

    /// Returns whether the resource is a singleton.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        self.options.is_singleton()
    }

    /// Returns the field name the item identifier is injected under.
    #[must_use]
    pub const fn primary_key(&self) -> &KeyName {
        self.options.primary_key()
    }

    /// Returns the field name the parent identifier is injected under.
    #[must_use]
    pub const fn parent_key(&self) -> &KeyName {
        self.options.parent_key()
    }

    /// Returns the `Content-Type` of rendered responses.
    #[must_use]
    pub const fn content_type(&self) -> &HeaderValue {
        self.options.content_type().header_value()
    }

    /// Sets the `list` callback.
    pub fn list<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Document) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        self.list = CallbackSlot::Registered(Arc::new(handler));
        self
    }

    /// Sets the `one` callback.
    pub fn one<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Document) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        self.one = CallbackSlot::Registered(Arc::new(handler));
        self
    }

    /// Sets the `save` callback.
    pub fn save<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Document) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        self.save = CallbackSlot::Registered(Arc::new(handler));
        self
    }

    /// Sets the `delete` callback.
    pub fn delete<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Document) -> Result<Value, CallbackError> + Send + Sync + 'static,
    {
        self.delete = CallbackSlot::Registered(Arc::new(handler));
        self
    }

    /// Returns the slot for `callback`.
    #[must_use]
    pub const fn callback(&self, callback: Callback) -> &CallbackSlot {
        match callback {
            Callback::List => &self.list,
            Callback::One => &self.one,
            Callback::Save => &self.save,
            Callback::Delete => &self.delete,
        }
    }

    /// Replaces the response body serializer.
    pub fn serialize<F>(&mut self, serializer: F) -> &mut Self
    where
        F: Fn(&Value) -> Result<String, serde_json::Error> + Send + Sync + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    /// Serializes a callback result with the configured serializer.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize_value(&self, value: &Value) -> Result<String, serde_json::Error> {
        match &self.serializer {
            Some(serializer) => serializer(value),
            None => default_serializer(value),
        }
    }

    /// Selects exactly the routes to activate, replacing the defaults.
    pub fn routes<I>(&mut self, routes: I) -> &mut Self
    where
        I: IntoIterator<Item = ResourceRoute>,
    {
        let mut selected: Vec<ResourceRoute> = Vec::new();
        for route in routes {
            if !selected.contains(&route) {
                selected.push(route);
            }
        }
        self.routes = Some(selected);
        self
    }

    /// Returns the explicitly selected routes, if any.
    #[must_use]
    pub fn selected_routes(&self) -> Option<&[ResourceRoute]> {
        self.routes.as_deref()
    }

    /// Returns the routes to activate.
    ///
    /// Without an explicit selection this is every route, minus `index` for
    /// singletons.
    #[must_use]
    pub fn active_routes(&self) -> Vec<ResourceRoute> {
        self.routes
            .clone()
            .unwrap_or_else(|| ResourceRoute::defaults(self.is_singleton()))
    }

    /// Picks this resource's captures out of a request's path parameters.
    ///
    /// `params` are the `(name, value)` pairs extracted by the router for the
    /// whole matched pattern. The result holds the values of the captures
    /// introduced by the resource's own segment, in declaration order.
    #[must_use]
    pub fn captures_from<'a, I>(&self, params: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: Vec<(&str, &str)> = params.into_iter().collect();
        self.path
            .captures()
            .iter()
            .filter_map(|name| {
                params
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_string())
            })
            .collect()
    }

    /// Returns the item identifier from a request's path parameters.
    #[must_use]
    pub fn identifier_from<'a, I>(&self, params: I) -> Option<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let item = self.path.item_capture()?;
        params
            .into_iter()
            .find(|(key, _)| *key == item)
            .map(|(_, value)| value.to_string())
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("list", &self.list)
            .field("one", &self.one)
            .field("save", &self.save)
            .field("delete", &self.delete)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<CallbackSlot>();
};
