//! Integration tests for resource routing.
//!
//! These tests drive the built router with `tower::ServiceExt::oneshot` and
//! verify route activation, argument assembly, failure mapping, nesting,
//! scopes and content negotiation.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rest_resources::rest::{Document, RouteContext};
use rest_resources::{
    ApiConfig, ApiScope, ConfigError, ResourceOptions, ResourceRoute, RestApi,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

type Calls = Arc<Mutex<Vec<(&'static str, Document)>>>;

/// Registers all four callbacks, each echoing its name and arguments.
fn record_callbacks(resource: &mut rest_resources::rest::Resource, calls: &Calls) {
    let record = |name: &'static str| {
        let calls = Arc::clone(calls);
        move |args: Document| -> Result<Value, rest_resources::rest::CallbackError> {
            calls.lock().unwrap().push((name, args.clone()));
            Ok(json!({ "callback": name, "args": args }))
        }
    };
    resource.list(record("list"));
    resource.one(record("one"));
    resource.save(record("save"));
    resource.delete(record("delete"));
}

fn options() -> ResourceOptions {
    ResourceOptions::default()
}

fn singleton() -> ResourceOptions {
    ResourceOptions::builder().singleton(true).build().unwrap()
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    send_with_host(router, method, uri, body, None).await
}

async fn send_with_host(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
    host: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(host) = host {
        builder = builder.header(header::HOST, host);
    }
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let req = builder.body(body).unwrap();

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

fn posts_router(calls: &Calls) -> Router {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| record_callbacks(posts, calls));
    api.build().unwrap()
}

// ============================================================================
// Default route activation
// ============================================================================

#[tokio::test]
async fn test_collection_activates_all_seven_routes() {
    let calls = Calls::default();
    let router = posts_router(&calls);

    let (status, _, body) = send(&router, "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["callback"], "list");

    let (status, _, body) = send(&router, "GET", "/posts/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "42" }));

    let (status, _, body) = send(&router, "POST", "/posts", Some(r#"{"name":"a"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse(&body)["callback"], "save");

    for method in ["PUT", "PATCH"] {
        let (status, _, body) = send(&router, method, "/posts/42", Some(r#"{"name":"b"}"#)).await;
        assert_eq!(status, StatusCode::OK, "{method}");
        assert_eq!(parse(&body)["args"], json!({ "name": "b", "id": "42" }));
    }

    let (status, _, body) = send(&router, "DELETE", "/posts/42", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _, body) = send(&router, "GET", "/posts/42/edit", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "42" }));

    let (status, _, body) = send(&router, "GET", "/posts/new", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "new" }));

    let names: Vec<&str> = calls.lock().unwrap().iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        ["list", "one", "save", "save", "save", "delete", "one", "one"]
    );
}

#[tokio::test]
async fn test_collection_root_accepts_trailing_slash() {
    let calls = Calls::default();
    let router = posts_router(&calls);

    let (status, _, body) = send(&router, "GET", "/posts/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["callback"], "list");
}

#[tokio::test]
async fn test_singleton_has_no_index_and_no_identifier() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("profile", singleton(), |profile| record_callbacks(profile, &calls));
    let router = api.build().unwrap();

    // GET on the root is `show`, not `index`.
    let (status, _, body) = send(&router, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["callback"], "one");
    assert_eq!(parse(&body)["args"], json!({}));

    let (status, _, body) = send(&router, "PATCH", "/profile", Some(r#"{"bio":"x"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "bio": "x" }));

    let (status, _, _) = send(&router, "GET", "/profile/edit", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&router, "DELETE", "/profile", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // No item paths exist.
    let (status, _, _) = send(&router, "GET", "/profile/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(calls.lock().unwrap().iter().all(|(name, _)| *name != "list"));
}

#[tokio::test]
async fn test_explicit_routes_replace_defaults() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.routes([ResourceRoute::Show]);
    });
    let router = api.build().unwrap();

    let (status, _, _) = send(&router, "GET", "/posts/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&router, "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&router, "POST", "/posts", Some("{}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_disallowed_verb_answers_404_not_405() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.routes([ResourceRoute::Index]);
    });
    let router = api.build().unwrap();

    let (status, _, _) = send(&router, "DELETE", "/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&router, "GET", "/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_identifiers_answer_404() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.resource("comments", options(), |comments| {
            record_callbacks(comments, &calls);
        });
    });
    let router = api.build().unwrap();

    for (method, uri) in [
        ("GET", "/posts/abc"),
        ("GET", "/posts/abc/edit"),
        ("PATCH", "/posts/1x"),
        ("DELETE", "/posts/-1"),
        ("GET", "/posts/abc/comments"),
        ("POST", "/posts/abc/comments"),
        ("GET", "/posts/1/comments/abc"),
    ] {
        let (status, _, body) = send(&router, method, uri, Some("{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert!(body.is_empty());
    }
    assert!(calls.lock().unwrap().is_empty());

    let (status, _, _) = send(&router, "GET", "/posts/007/comments", None).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Argument assembly
// ============================================================================

#[tokio::test]
async fn test_save_receives_body_exactly() {
    let calls = Calls::default();
    let router = posts_router(&calls);

    send(&router, "POST", "/posts?ignored=1", Some(r#"{"name":"a"}"#)).await;

    let calls = calls.lock().unwrap();
    let (_, args) = &calls[0];
    assert_eq!(Value::Object(args.clone()), json!({ "name": "a" }));
}

#[tokio::test]
async fn test_show_merges_query_with_identifier() {
    let calls = Calls::default();
    let router = posts_router(&calls);

    let (_, _, body) = send(&router, "GET", "/posts/42?fields=title&q=a+b%21", None).await;

    assert_eq!(
        parse(&body)["args"],
        json!({ "fields": "title", "q": "a b!", "id": "42" })
    );
}

#[tokio::test]
async fn test_custom_keys_are_used() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.resource(
            "comments",
            ResourceOptions::builder()
                .primary_key("comment_id")
                .parent_key("post_id")
                .build()
                .unwrap(),
            |comments| record_callbacks(comments, &calls),
        );
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/posts/7/comments/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse(&body)["args"],
        json!({ "comment_id": "3", "post_id": "7" })
    );
}

// ============================================================================
// Nesting
// ============================================================================

#[tokio::test]
async fn test_nested_save_receives_parent_key() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.resource("comments", options(), |comments| {
            record_callbacks(comments, &calls);
        });
    });
    let router = api.build().unwrap();

    let (status, _, _) = send(&router, "POST", "/posts/7/comments", Some(r#"{"x":1}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    let calls = calls.lock().unwrap();
    assert_eq!(
        Value::Object(calls[0].1.clone()),
        json!({ "x": 1, "parent_id": "7" })
    );
}

#[tokio::test]
async fn test_bare_nested_resource_has_no_parent_capture() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.resource(
            "search",
            ResourceOptions::builder().bare(true).build().unwrap(),
            |search| {
                record_callbacks(search, &calls);
                search.routes([ResourceRoute::Index]);
            },
        );
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/posts/search?q=rust", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "q": "rust" }));
}

#[tokio::test]
async fn test_deeply_nested_resources_see_their_own_parent() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("users", options(), |users| {
        users.resource("posts", options(), |posts| {
            posts.resource("comments", options(), |comments| {
                record_callbacks(comments, &calls);
            });
        });
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/users/1/posts/2/comments/3", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "3", "parent_id": "2" }));
}

#[tokio::test]
async fn test_declared_capture_is_the_parent_key() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource(":org/projects", options(), |projects| {
        record_callbacks(projects, &calls);
    });
    let router = api.build().unwrap();

    let (_, _, body) = send(&router, "GET", "/acme/projects", None).await;

    assert_eq!(parse(&body)["args"], json!({ "parent_id": "acme" }));
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_own_captures() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.resource("comments", options(), |comments| {
            comments.list(|args| Ok(json!(args["parent_id"])));
        });
    });
    let router = api.build().unwrap();

    let mut tasks = Vec::new();
    for parent in 0..32 {
        let router = router.clone();
        tasks.push(tokio::spawn(async move {
            let uri = format!("/posts/{parent}/comments");
            let (_, _, body) = send(&router, "GET", &uri, None).await;
            (parent, body)
        }));
    }

    for task in tasks {
        let (parent, body) = task.await.unwrap();
        assert_eq!(body, parent.to_string());
    }
}

// ============================================================================
// Failure mapping
// ============================================================================

fn failing_router(development: bool) -> Router {
    let mut api = RestApi::new(ApiConfig::builder().development(development).build());
    api.resource("posts", options(), |posts| {
        posts.one(|_| Err("post not found in store".into()));
        posts.save(|_| Err("title can't be blank".into()));
    });
    api.build().unwrap()
}

#[tokio::test]
async fn test_failing_show_answers_404_without_body() {
    let router = failing_router(false);

    let (status, content_type, body) = send(&router, "GET", "/posts/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.is_none());
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_failing_create_answers_422() {
    let router = failing_router(false);

    let (status, _, body) = send(&router, "POST", "/posts", Some(r#"{"title":""}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_malformed_body_answers_422() {
    let router = failing_router(false);

    let (status, _, _) = send(&router, "PUT", "/posts/1", Some("[1, 2]")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unregistered_callback_answers_404() {
    let router = failing_router(false);

    let (status, _, _) = send(&router, "DELETE", "/posts/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_development_mode_surfaces_failures() {
    let router = failing_router(true);

    let (status, content_type, body) = send(&router, "GET", "/posts/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert!(body.contains("post not found in store"));

    let (status, _, body) = send(&router, "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("list is not implemented"));
}

// ============================================================================
// Custom handlers
// ============================================================================

#[tokio::test]
async fn test_custom_show_handler_wins_over_default() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.show_with(|ctx: &mut RouteContext<'_>| {
            Ok(Some(json!({ "custom": ctx.id() })))
        });
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/posts/5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({ "custom": "5" }));
    assert!(calls.lock().unwrap().is_empty());

    // The other routes keep their defaults.
    let (status, _, body) = send(&router, "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["callback"], "list");
}

#[tokio::test]
async fn test_custom_handler_can_call_perform_and_set_headers() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.create_with(|ctx: &mut RouteContext<'_>| {
            let value = ctx.perform(rest_resources::rest::Callback::Save, None)?;
            ctx.response_mut().insert_header(
                header::LOCATION,
                header::HeaderValue::from_static("/posts/1"),
            );
            Ok(value)
        });
    });
    let router = api.build().unwrap();

    let req = Request::builder()
        .method("POST")
        .uri("/posts")
        .body(Body::from(r#"{"title":"t"}"#))
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[header::LOCATION], "/posts/1");
    assert_eq!(calls.lock().unwrap()[0].0, "save");
}

#[tokio::test]
async fn test_explicit_route_is_installed_outside_selection() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        record_callbacks(posts, &calls);
        posts.routes([ResourceRoute::Index]);
        posts.new();
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/posts/new", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "new" }));
}

#[tokio::test]
async fn test_singleton_index_wins_over_show_on_the_root() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("profile", singleton(), |profile| {
        record_callbacks(profile, &calls);
        profile.routes([ResourceRoute::Index, ResourceRoute::Show]);
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/profile", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["callback"], "list");
}

#[tokio::test]
async fn test_first_declared_handler_wins() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.show_with(|_| Ok(Some(json!("first"))));
        posts.show_with(|_| Ok(Some(json!("second"))));
    });
    let router = api.build().unwrap();

    let (status, _, body) = send(&router, "GET", "/posts/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "first");
}

// ============================================================================
// Scopes
// ============================================================================

#[tokio::test]
async fn test_api_and_version_prefixes_compose() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.api(ApiScope::default(), |api| {
        api.version(1, |v1| {
            v1.resource("posts", options(), |posts| record_callbacks(posts, &calls));
        });
    });
    let router = api.build().unwrap();

    let (status, _, _) = send(&router, "GET", "/api/v1/posts", None).await;
    assert_eq!(status, StatusCode::OK);

    // The api segment is optional, the version is not.
    let (status, _, _) = send(&router, "GET", "/v1/posts", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&router, "GET", "/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_prefix_is_optional() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.api(ApiScope::default(), |api| {
        api.resource("posts", options(), |posts| {
            record_callbacks(posts, &calls);
            posts.resource("comments", options(), |comments| {
                record_callbacks(comments, &calls);
            });
        });
    });
    let router = api.build().unwrap();

    for uri in ["/api/posts", "/posts", "/posts/"] {
        let (status, _, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "GET {uri}");
        assert_eq!(parse(&body)["callback"], "list");
    }

    let (status, _, body) = send(&router, "GET", "/posts/4/comments/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["args"], json!({ "id": "2", "parent_id": "4" }));

    let (status, _, _) = send(&router, "POST", "/posts", Some("{}")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_subdomain_restricted_api() {
    let calls = Calls::default();
    let mut api = RestApi::new(ApiConfig::default());
    api.api(
        ApiScope::builder().path("rest").subdomain("api").build().unwrap(),
        |api| {
            api.resource("posts", options(), |posts| record_callbacks(posts, &calls));
        },
    );
    let router = api.build().unwrap();

    let (status, _, _) =
        send_with_host(&router, "GET", "/rest/posts", None, Some("api.example.com")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) =
        send_with_host(&router, "GET", "/rest/posts", None, Some("www.example.com")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&router, "GET", "/rest/posts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Leaving out the prefix keeps the host restriction.
    let (status, _, _) =
        send_with_host(&router, "GET", "/posts", None, Some("api.example.com")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) =
        send_with_host(&router, "GET", "/posts", None, Some("www.example.com")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Content negotiation
// ============================================================================

#[tokio::test]
async fn test_json_content_type_by_default() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.list(|_| Ok(json!([{ "id": 1 }])));
    });
    let router = api.build().unwrap();

    let (_, content_type, body) = send(&router, "GET", "/posts", None).await;

    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, r#"[{"id":1}]"#);
}

#[tokio::test]
async fn test_custom_content_type_and_serializer_reach_the_wire() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource(
        "pages",
        ResourceOptions::builder().content_type("text/html").build().unwrap(),
        |pages| {
            pages.one(|args| Ok(json!({ "title": args["id"] })));
            pages.serialize(|value| Ok(format!("<h1>{}</h1>", value["title"].as_str().unwrap_or_default())));
        },
    );
    let router = api.build().unwrap();

    let (status, content_type, body) = send(&router, "GET", "/pages/7", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html"));
    assert_eq!(body, "<h1>7</h1>");
}

#[tokio::test]
async fn test_string_results_are_written_verbatim() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("notes", options(), |notes| {
        notes.one(|_| Ok(json!("plain text")));
    });
    let router = api.build().unwrap();

    let (_, _, body) = send(&router, "GET", "/notes/1", None).await;

    assert_eq!(body, "plain text");
}

#[tokio::test]
async fn test_false_result_has_no_body() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.one(|_| Ok(Value::Bool(false)));
        posts.list(|_| Ok(Value::Bool(true)));
    });
    let router = api.build().unwrap();

    let (status, content_type, body) = send(&router, "GET", "/posts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.is_none());
    assert!(body.is_empty());

    let (_, content_type, body) = send(&router, "GET", "/posts", None).await;
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, "true");
}

#[tokio::test]
async fn test_null_result_has_no_body() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.one(|_| Ok(Value::Null));
    });
    let router = api.build().unwrap();

    let (status, content_type, body) = send(&router, "GET", "/posts/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.is_none());
    assert!(body.is_empty());
}

// ============================================================================
// Build errors
// ============================================================================

#[test]
fn test_route_conflicts_are_reported() {
    let mut api = RestApi::new(ApiConfig::default());
    api.resource("posts", options(), |posts| {
        posts.routes([ResourceRoute::Show]);
    });
    api.resource("posts", options(), |posts| {
        posts.routes([ResourceRoute::Show]);
    });

    assert!(matches!(
        api.build(),
        Err(ConfigError::RouteConflict { ref path, .. }) if path == "/posts/{id_0}"
    ));
}

#[test]
fn test_api_prefix_overlapping_a_root_resource_is_a_conflict() {
    let mut api = RestApi::new(ApiConfig::default());
    api.api(ApiScope::default(), |api| {
        api.resource("posts", options(), |_| {});
    });
    api.resource("posts", options(), |_| {});

    assert!(matches!(api.build(), Err(ConfigError::RouteConflict { .. })));
}
