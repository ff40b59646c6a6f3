//! The declaration DSL and its translation into an axum [`Router`].
//!
//! Resources are declared inside nested blocks. Each block receives a scope
//! value that knows the enclosing path prefix, the nesting depth and the
//! host restriction; nested declarations borrow a fresh child scope for the
//! duration of their block. When a resource block returns, the resource is
//! frozen behind an `Arc` and its routes are activated:
//!
//! 1. Routes declared explicitly in the block (`show`, `show_with`, ...) are
//!    installed first.
//! 2. Each route of [`Resource::active_routes`] that was not declared
//!    explicitly gets the default handler.
//!
//! When two routes of one resource land on the same verb and path, such as
//! a singleton's `index` and `show`, the first one installed wins.
//!
//! [`RestApi::build`] groups the recorded endpoints by pattern, reports
//! declaration errors and route conflicts, and produces the router. Verbs a
//! resource path does not handle answer `404`, as do unmatched paths.
//!
//! # Example
//!
//! ```rust
//! use rest_resources::{ApiConfig, ApiScope, ResourceOptions, RestApi};
//! use serde_json::json;
//!
//! let mut api = RestApi::new(ApiConfig::default());
//! api.api(ApiScope::default(), |api| {
//!     api.version(1, |v1| {
//!         v1.resource("posts", ResourceOptions::default(), |posts| {
//!             posts.list(|_| Ok(json!([])));
//!             posts.one(|args| Ok(json!({ "id": args["id"] })));
//!
//!             posts.resource("comments", ResourceOptions::default(), |comments| {
//!                 comments.list(|args| Ok(json!({ "post": args["parent_id"] })));
//!             });
//!         });
//!     });
//! });
//!
//! let router = api.build().unwrap();
//! # let _ = router;
//! ```

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::RawPathParamsRejection;
use axum::extract::{RawPathParams, Request, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use axum::Router;
use serde_json::Value;

use crate::config::{ApiConfig, ApiScope, ResourceOptions, Subdomain};
use crate::error::ConfigError;
use crate::http::{HttpMethod, RequestContext};
use crate::rest::dispatch::RouteContext;
use crate::rest::errors::PerformError;
use crate::rest::negotiate;
use crate::rest::path::{self, ResourcePath, ResourceRoute};
use crate::rest::resource::Resource;

/// A route handler.
///
/// Handlers receive the per-request [`RouteContext`] and return the value to
/// render, `None` for an empty body, or a [`PerformError`].
pub type RouteHandler =
    Arc<dyn Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync>;

/// Returns the handler installed for routes without a custom handler.
///
/// It dispatches to the route's callback with the captured identifier
/// (`"new"` for the `new` route).
#[must_use]
pub fn default_handler(route: ResourceRoute) -> RouteHandler {
    let callback = route.callback();
    Arc::new(move |ctx: &mut RouteContext<'_>| {
        let id = ctx.id().map(str::to_owned);
        ctx.perform(callback, id.as_deref())
    })
}

struct Endpoint {
    method: HttpMethod,
    pattern: String,
    host: Option<Subdomain>,
    route: ResourceRoute,
    resource: Arc<Resource>,
    handler: RouteHandler,
}

/// The path prefix of a scope, plus the equivalent prefixes that leave out
/// optional segments such as the default `api` prefix.
#[derive(Clone, Debug, Default)]
struct Prefixes {
    canonical: String,
    alternates: Vec<String>,
}

impl Prefixes {
    fn join(&self, segment: &str, optional: bool) -> Self {
        let join = |prefix: &str| {
            if segment.is_empty() {
                prefix.to_string()
            } else {
                format!("{}/{segment}", prefix.trim_end_matches('/'))
            }
        };

        let canonical = join(&self.canonical);
        let mut candidates: Vec<String> = self.alternates.iter().map(|p| join(p)).collect();
        if optional {
            candidates.push(self.canonical.clone());
            candidates.extend(self.alternates.iter().cloned());
        }

        let mut alternates = Vec::new();
        for candidate in candidates {
            if candidate != canonical && !alternates.contains(&candidate) {
                alternates.push(candidate);
            }
        }
        Self {
            canonical,
            alternates,
        }
    }

    /// Returns `pattern` followed by its rewrites under each alternate.
    fn expand(&self, pattern: &str) -> Vec<String> {
        let mut patterns = vec![pattern.to_string()];
        if let Some(rest) = pattern.strip_prefix(self.canonical.as_str()) {
            patterns.extend(self.alternates.iter().map(|alt| format!("{alt}{rest}")));
        }
        patterns
    }

    fn nest(&self, mount: &str) -> Self {
        let mut patterns = self.expand(mount);
        let canonical = patterns.remove(0);
        Self {
            canonical,
            alternates: patterns,
        }
    }
}

/// Endpoints and declaration errors collected while running blocks.
#[derive(Default)]
struct RouteTable {
    endpoints: Vec<Endpoint>,
    errors: Vec<ConfigError>,
}

impl RouteTable {
    fn add(
        &mut self,
        resource: &Arc<Resource>,
        route: ResourceRoute,
        handler: &RouteHandler,
        host: Option<&Subdomain>,
        prefixes: &Prefixes,
    ) {
        let patterns = resource
            .resource_path()
            .route_patterns(route)
            .iter()
            .flat_map(|pattern| prefixes.expand(pattern))
            .collect::<Vec<_>>();

        for pattern in patterns {
            for &method in route.http_methods() {
                // First declaration wins within a resource.
                if self.endpoints.iter().any(|endpoint| {
                    Arc::ptr_eq(&endpoint.resource, resource)
                        && endpoint.method == method
                        && endpoint.pattern == pattern
                }) {
                    tracing::debug!(
                        method = %method,
                        path = %pattern,
                        route = %route,
                        "path already routed by this resource, keeping the first route"
                    );
                    continue;
                }
                tracing::debug!(
                    method = %method,
                    path = %pattern,
                    route = %route,
                    "registering resource route"
                );
                self.endpoints.push(Endpoint {
                    method,
                    pattern: pattern.clone(),
                    host: host.cloned(),
                    route,
                    resource: Arc::clone(resource),
                    handler: Arc::clone(handler),
                });
            }
        }
    }
}

/// Entry point of the declaration DSL.
///
/// # Example
///
/// ```rust
/// use rest_resources::{ApiConfig, ResourceOptions, RestApi};
/// use serde_json::json;
///
/// let mut api = RestApi::new(ApiConfig::default());
/// api.resource("profile", ResourceOptions::builder().singleton(true).build().unwrap(), |profile| {
///     profile.one(|_| Ok(json!({ "name": "Ada" })));
/// });
/// let router = api.build().unwrap();
/// # let _ = router;
/// ```
pub struct RestApi {
    config: ApiConfig,
    table: RouteTable,
}

impl RestApi {
    /// Creates an empty API.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            table: RouteTable::default(),
        }
    }

    /// Returns the configuration handlers run with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn root(&mut self) -> Scope<'_> {
        Scope {
            prefixes: Prefixes::default(),
            depth: 0,
            nested: false,
            host: None,
            table: &mut self.table,
        }
    }

    /// Mounts `block` under an API prefix, see [`Scope::api`].
    pub fn api<F>(&mut self, options: ApiScope, block: F) -> &mut Self
    where
        F: FnOnce(&mut Scope<'_>),
    {
        self.root().api(options, block);
        self
    }

    /// Mounts `block` under `v<version>`, see [`Scope::version`].
    pub fn version<F>(&mut self, version: u32, block: F) -> &mut Self
    where
        F: FnOnce(&mut Scope<'_>),
    {
        self.root().version(version, block);
        self
    }

    /// Declares a top-level resource, see [`Scope::resource`].
    pub fn resource<F>(&mut self, path: &str, options: ResourceOptions, block: F) -> &mut Self
    where
        F: FnOnce(&mut ResourceScope<'_>),
    {
        self.root().resource(path, options, block);
        self
    }

    /// Builds the router.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while running declaration blocks, or
    /// [`ConfigError::RouteConflict`] when two endpoints claim the same verb
    /// and path, the same path under different hosts, or patterns the router
    /// cannot tell apart.
    pub fn build(self) -> Result<Router, ConfigError> {
        let Self { config, table } = self;
        if let Some(error) = table.errors.into_iter().next() {
            return Err(error);
        }

        let mut by_pattern: BTreeMap<String, Vec<Endpoint>> = BTreeMap::new();
        for endpoint in table.endpoints {
            check_conflicts(&by_pattern, &endpoint)?;
            by_pattern
                .entry(endpoint.pattern.clone())
                .or_default()
                .push(endpoint);
        }

        let development = config.is_development();
        let mut router = Router::new();
        for (pattern, endpoints) in by_pattern {
            let host = endpoints.first().and_then(|endpoint| endpoint.host.clone());

            let mut method_router = MethodRouter::new();
            for endpoint in endpoints {
                let filter = endpoint.method.method_filter();
                method_router = method_router.on(filter, endpoint_handler(endpoint, development));
            }
            if let Some(subdomain) = host {
                method_router = method_router
                    .route_layer(middleware::from_fn_with_state(subdomain, require_subdomain));
            }
            router = router.route(&pattern, method_router.fallback(not_found));
        }

        Ok(router.fallback(not_found))
    }
}

impl std::fmt::Debug for RestApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApi")
            .field("config", &self.config)
            .field("endpoints", &self.table.endpoints.len())
            .field("errors", &self.table.errors)
            .finish()
    }
}

fn check_conflicts(
    by_pattern: &BTreeMap<String, Vec<Endpoint>>,
    endpoint: &Endpoint,
) -> Result<(), ConfigError> {
    let conflict = || ConfigError::RouteConflict {
        method: endpoint.method,
        path: endpoint.pattern.clone(),
    };

    if let Some(existing) = by_pattern.get(&endpoint.pattern) {
        if existing
            .iter()
            .any(|other| other.method == endpoint.method || other.host != endpoint.host)
        {
            return Err(conflict());
        }
    }
    if by_pattern
        .keys()
        .any(|pattern| captures_conflict(pattern, &endpoint.pattern))
    {
        return Err(conflict());
    }
    Ok(())
}

/// Returns `true` if the router would reject `a` and `b` side by side: both
/// share a literal prefix and then capture the same segment under different
/// names.
fn captures_conflict(a: &str, b: &str) -> bool {
    let is_capture = |segment: &str| segment.starts_with('{') && segment.ends_with('}');

    for (left, right) in a.split('/').zip(b.split('/')) {
        if left == right {
            continue;
        }
        return is_capture(left) && is_capture(right);
    }
    false
}

fn endpoint_handler(
    endpoint: Endpoint,
    development: bool,
) -> impl Fn(Result<RawPathParams, RawPathParamsRejection>, Uri, HeaderMap, Bytes) -> std::future::Ready<Response>
       + Clone
       + Send
       + Sync
       + 'static {
    let Endpoint {
        route,
        resource,
        handler,
        ..
    } = endpoint;

    move |params: Result<RawPathParams, RawPathParamsRejection>,
          uri: Uri,
          headers: HeaderMap,
          body: Bytes| {
        std::future::ready(handle(
            &resource,
            route,
            &handler,
            development,
            params,
            uri,
            headers,
            body,
        ))
    }
}

#[allow(clippy::too_many_arguments)]
fn handle(
    resource: &Resource,
    route: ResourceRoute,
    handler: &RouteHandler,
    development: bool,
    params: Result<RawPathParams, RawPathParamsRejection>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = match params {
        Ok(params) => params,
        Err(rejection) => return rejection.into_response(),
    };
    let pairs: Vec<(&str, &str)> = params.iter().collect();

    if let Some((name, value)) = pairs
        .iter()
        .find(|(name, value)| path::is_item_capture(name) && !path::is_identifier(value))
    {
        tracing::debug!(
            resource = resource.path(),
            capture = %name,
            value = %value,
            "identifier is not numeric"
        );
        return StatusCode::NOT_FOUND.into_response();
    }

    let id = match route {
        ResourceRoute::New => Some("new".to_string()),
        _ if route.is_item_route() => resource.identifier_from(pairs.iter().copied()),
        _ => None,
    };
    let request = RequestContext::builder()
        .uri(uri)
        .headers(headers)
        .body(body)
        .captures(resource.captures_from(pairs.iter().copied()))
        .build();

    let mut ctx = RouteContext::new(resource, &request, development, id);
    if let Some(status) = route.success_status() {
        ctx.response_mut().set_status(status);
    }
    let result = handler(&mut ctx);
    let mut parts = ctx.into_response_parts();

    let value = match result {
        Ok(value) => value,
        Err(error) if development => return negotiate::error_response(resource, &error),
        Err(error) => {
            tracing::debug!(
                resource = resource.path(),
                route = %route,
                error = %error,
                "route handler failed"
            );
            parts.set_status(error.status());
            None
        }
    };

    negotiate::render(resource, parts, value)
        .unwrap_or_else(|error| negotiate::error_response(resource, &error))
}

async fn require_subdomain(
    State(subdomain): State<Subdomain>,
    request: Request,
    next: Next,
) -> Response {
    let allowed = request
        .headers()
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .or_else(|| request.uri().host())
        .is_some_and(|host| subdomain.matches_host(host));

    if allowed {
        next.run(request).await
    } else {
        tracing::debug!(subdomain = %subdomain, "host does not match subdomain");
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// A declaration scope: a path prefix, a nesting depth and a host
/// restriction.
pub struct Scope<'a> {
    prefixes: Prefixes,
    depth: usize,
    nested: bool,
    host: Option<Subdomain>,
    table: &'a mut RouteTable,
}

impl Scope<'_> {
    /// Returns the path prefix of the scope.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefixes.canonical
    }

    /// Returns the prefixes that also reach the scope because they leave out
    /// an optional `api` segment.
    #[must_use]
    pub fn alternate_prefixes(&self) -> &[String] {
        &self.prefixes.alternates
    }

    fn child(&mut self, segment: &str, optional: bool, host: Option<Subdomain>) -> Scope<'_> {
        Scope {
            prefixes: self.prefixes.join(segment, optional),
            depth: self.depth,
            nested: self.nested,
            host,
            table: &mut *self.table,
        }
    }

    /// Mounts `block` under the scope's path (default `"api"`).
    ///
    /// The prefix is optional: every route declared in the block also
    /// answers without it, so `/api/posts` and `/posts` reach the same
    /// resource. With a subdomain, routes declared in the block only answer requests
    /// whose `Host` starts with `"<subdomain>."`; other hosts get `404`.
    pub fn api<F>(&mut self, options: ApiScope, block: F) -> &mut Self
    where
        F: FnOnce(&mut Scope<'_>),
    {
        let segment = options.path().trim_matches('/');
        if segment.contains(['{', '}', '*', '?', '#', ':']) {
            self.table.errors.push(ConfigError::InvalidResourcePath {
                path: options.path().to_string(),
                reason: "scope prefixes must be literal",
            });
            return self;
        }

        let host = options.subdomain().cloned().or_else(|| self.host.clone());
        block(&mut self.child(segment, true, host));
        self
    }

    /// Mounts `block` under `v<version>`.
    pub fn version<F>(&mut self, version: u32, block: F) -> &mut Self
    where
        F: FnOnce(&mut Scope<'_>),
    {
        let host = self.host.clone();
        block(&mut self.child(&format!("v{version}"), false, host));
        self
    }

    /// Declares a resource mounted at `path` and runs its block.
    ///
    /// Invalid paths are recorded and reported by [`RestApi::build`]; the
    /// block is not run.
    pub fn resource<F>(&mut self, path: &str, options: ResourceOptions, block: F) -> &mut Self
    where
        F: FnOnce(&mut ResourceScope<'_>),
    {
        let resource_path = match ResourcePath::new(
            &self.prefixes.canonical,
            path,
            self.depth,
            self.nested,
            options.is_bare(),
            options.is_singleton(),
        ) {
            Ok(resource_path) => resource_path,
            Err(error) => {
                self.table.errors.push(error);
                return self;
            }
        };

        let mut scope = ResourceScope {
            resource: Resource::new(resource_path, options),
            declared: Vec::new(),
            depth: self.depth,
            prefixes: self.prefixes.clone(),
            host: self.host.clone(),
            table: &mut *self.table,
        };
        block(&mut scope);
        scope.activate();
        self
    }
}

/// The scope of one resource declaration block.
///
/// Dereferences to the [`Resource`] being declared, so callbacks, the
/// serializer and the route selection are set directly on it.
pub struct ResourceScope<'a> {
    resource: Resource,
    declared: Vec<(ResourceRoute, RouteHandler)>,
    depth: usize,
    prefixes: Prefixes,
    host: Option<Subdomain>,
    table: &'a mut RouteTable,
}

impl ResourceScope<'_> {
    /// Declares a child resource mounted under this resource's item capture
    /// (or directly under its path when `bare`).
    pub fn resource<F>(&mut self, path: &str, options: ResourceOptions, block: F) -> &mut Self
    where
        F: FnOnce(&mut ResourceScope<'_>),
    {
        let mut scope = Scope {
            prefixes: self.prefixes.nest(self.resource.resource_path().mount()),
            depth: self.depth + 1,
            nested: true,
            host: self.host.clone(),
            table: &mut *self.table,
        };
        scope.resource(path, options, block);
        self
    }

    /// Selects routes by name, replacing the defaults.
    ///
    /// Unknown names are recorded and reported by [`RestApi::build`].
    pub fn routes_named<'n, I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut routes = Vec::new();
        for name in names {
            match name.parse::<ResourceRoute>() {
                Ok(route) => routes.push(route),
                Err(error) => self.table.errors.push(error),
            }
        }
        self.resource.routes(routes);
        self
    }

    /// Declares `route` with the default handler.
    pub fn route(&mut self, route: ResourceRoute) -> &mut Self {
        self.declared.push((route, default_handler(route)));
        self
    }

    /// Declares `route` with a custom handler.
    pub fn route_with<F>(&mut self, route: ResourceRoute, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.declared.push((route, Arc::new(handler)));
        self
    }

    /// Declares `index` (`GET P`).
    pub fn index(&mut self) -> &mut Self {
        self.route(ResourceRoute::Index)
    }

    /// Declares `index` with a custom handler.
    pub fn index_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Index, handler)
    }

    /// Declares `show` (`GET P/{id}`).
    pub fn show(&mut self) -> &mut Self {
        self.route(ResourceRoute::Show)
    }

    /// Declares `show` with a custom handler.
    pub fn show_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Show, handler)
    }

    /// Declares `create` (`POST P`).
    pub fn create(&mut self) -> &mut Self {
        self.route(ResourceRoute::Create)
    }

    /// Declares `create` with a custom handler. The status is `201` unless
    /// the handler changes it.
    pub fn create_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Create, handler)
    }

    /// Declares `update` (`PUT|PATCH P/{id}`).
    pub fn update(&mut self) -> &mut Self {
        self.route(ResourceRoute::Update)
    }

    /// Declares `update` with a custom handler.
    pub fn update_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Update, handler)
    }

    /// Declares `destroy` (`DELETE P/{id}`).
    pub fn destroy(&mut self) -> &mut Self {
        self.route(ResourceRoute::Destroy)
    }

    /// Declares `destroy` with a custom handler. The status is `204` unless
    /// the handler changes it.
    pub fn destroy_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Destroy, handler)
    }

    /// Declares `edit` (`GET P/{id}/edit`).
    pub fn edit(&mut self) -> &mut Self {
        self.route(ResourceRoute::Edit)
    }

    /// Declares `edit` with a custom handler.
    pub fn edit_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::Edit, handler)
    }

    /// Declares `new` (`GET P/new`).
    #[allow(clippy::new_ret_no_self, clippy::wrong_self_convention)]
    pub fn new(&mut self) -> &mut Self {
        self.route(ResourceRoute::New)
    }

    /// Declares `new` with a custom handler.
    pub fn new_with<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut RouteContext<'_>) -> Result<Option<Value>, PerformError> + Send + Sync + 'static,
    {
        self.route_with(ResourceRoute::New, handler)
    }

    fn activate(self) {
        let Self {
            resource,
            declared,
            prefixes,
            host,
            table,
            ..
        } = self;
        let resource = Arc::new(resource);

        let mut installed = Vec::with_capacity(declared.len());
        for (route, handler) in &declared {
            table.add(&resource, *route, handler, host.as_ref(), &prefixes);
            installed.push(*route);
        }
        for route in resource.active_routes() {
            if !installed.contains(&route) {
                table.add(
                    &resource,
                    route,
                    &default_handler(route),
                    host.as_ref(),
                    &prefixes,
                );
            }
        }
    }
}

impl Deref for ResourceScope<'_> {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}

impl DerefMut for ResourceScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.resource
    }
}
