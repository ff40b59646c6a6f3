//! Declarative REST resources.
//!
//! This module maps resource declarations onto conventional CRUD routes:
//!
//! - **[`RestApi`]**: Entry point of the declaration DSL; builds the router
//! - **[`Resource`]**: A resource node with callbacks, serializer and routes
//! - **[`ResourcePath`] and [`ResourceRoute`]**: Path building for the seven routes
//! - **[`perform`]**: Argument assembly and callback dispatch
//! - **[`render`]**: Content negotiation of callback results
//! - **[`PerformError`] and [`RenderError`]**: Request-time failures
//!
//! # Routes
//!
//! For a resource mounted at `P`:
//!
//! | Route     | Verb         | Path          | Callback | Status |
//! |-----------|--------------|---------------|----------|--------|
//! | `index`   | `GET`        | `P`           | `list`   | 200    |
//! | `show`    | `GET`        | `P/{id}`      | `one`    | 200    |
//! | `create`  | `POST`       | `P`           | `save`   | 201    |
//! | `update`  | `PUT, PATCH` | `P/{id}`      | `save`   | 200    |
//! | `destroy` | `DELETE`     | `P/{id}`      | `delete` | 204    |
//! | `edit`    | `GET`        | `P/{id}/edit` | `one`    | 200    |
//! | `new`     | `GET`        | `P/new`       | `one`    | 200    |
//!
//! Singletons drop `{id}` from item paths and do not expose `index` by
//! default. A failing callback answers `422` for `save` and `404` otherwise.
//!
//! # Example
//!
//! ```rust
//! use rest_resources::rest::RouteContext;
//! use rest_resources::{ApiConfig, ResourceOptions, RestApi};
//! use serde_json::json;
//!
//! let mut api = RestApi::new(ApiConfig::from_env());
//! api.resource("posts", ResourceOptions::default(), |posts| {
//!     posts.list(|args| Ok(json!({ "page": args.get("page") })));
//!     posts.save(|args| Ok(json!({ "saved": args })));
//!
//!     // Custom handler for show; other routes are activated with defaults.
//!     posts.show_with(|ctx: &mut RouteContext<'_>| {
//!         let id = ctx.id().unwrap_or_default().to_string();
//!         Ok(Some(json!({ "id": id })))
//!     });
//! });
//!
//! let router = api.build().unwrap();
//! # let _ = router;
//! ```

mod dispatch;
mod errors;
mod negotiate;
mod path;
mod registrar;
mod resource;

// Public exports
pub use dispatch::{build_document, perform, RouteContext};
pub use errors::{PerformError, RenderError};
pub use negotiate::{error_response, render};
pub use path::{is_identifier, is_item_capture, item_capture_name, ResourcePath, ResourceRoute};
pub use registrar::{default_handler, ResourceScope, RestApi, RouteHandler, Scope};
pub use resource::{
    default_serializer, Callback, CallbackError, CallbackFn, CallbackSlot, Document, Resource,
    SerializerFn,
};
