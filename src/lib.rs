//! # REST Resources for axum
//!
//! Declarative, nestable REST resources mapped onto an axum [`Router`](axum::Router).
//!
//! ## Overview
//!
//! This crate provides:
//! - A declaration DSL via [`RestApi`]: resources, nested resources, API
//!   prefixes with optional subdomain restriction, and version scopes
//! - The seven conventional routes (`index`, `show`, `create`, `update`,
//!   `destroy`, `edit`, `new`) bound to four callbacks (`list`, `one`,
//!   `save`, `delete`)
//! - Request-scoped argument assembly: query parameters or the JSON body,
//!   plus the item identifier and the parent identifier
//! - Failure mapping to `422`/`404`, or a detailed `500` in development mode
//! - Content negotiation with per-resource content types and serializers
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_resources::{ApiConfig, ApiScope, ResourceOptions, RestApi};
//! use serde_json::json;
//!
//! let mut api = RestApi::new(ApiConfig::builder().development(false).build());
//!
//! api.api(ApiScope::default(), |api| {
//!     api.resource("posts", ResourceOptions::default(), |posts| {
//!         posts.list(|_| Ok(json!([{ "id": 1 }])));
//!         posts.one(|args| Ok(json!({ "id": args["id"] })));
//!         posts.save(|args| Ok(json!(args)));
//!
//!         posts.resource("comments", ResourceOptions::default(), |comments| {
//!             // GET /api/posts/{post}/comments
//!             comments.list(|args| Ok(json!({ "post": args["parent_id"] })));
//!         });
//!     });
//! });
//!
//! let router: axum::Router = api.build().unwrap();
//! # let _ = router;
//! ```
//!
//! ## Configuration
//!
//! [`ApiConfig::from_env`] reads the `APP_ENV` environment variable; the
//! value `development` turns callback failures into `500` responses carrying
//! the error text. Resource options are validated once by
//! [`ResourceOptions::builder`]:
//!
//! ```rust
//! use rest_resources::ResourceOptions;
//!
//! let options = ResourceOptions::builder()
//!     .singleton(true)
//!     .primary_key("slug")
//!     .content_type("text/html")
//!     .build()
//!     .unwrap();
//! assert!(options.is_singleton());
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. Route
//! registration and swallowed callback failures are logged at `debug`;
//! failures surfaced in development mode and serializer failures at `error`.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Options and paths are validated at declaration time
//! - **Thread-safe**: Resources are immutable once declared and shared as `Arc`
//! - **Request-scoped captures**: Concurrent requests never share state

pub mod config;
pub mod error;
pub mod http;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{
    ApiConfig, ApiConfigBuilder, ApiScope, KeyName, MediaType, ResourceOptions, Subdomain,
};
pub use error::ConfigError;

// Re-export the declaration DSL
pub use rest::{PerformError, RenderError, ResourceRoute, RestApi, RouteContext};
