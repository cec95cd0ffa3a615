//! Integration tests for the comment submission flow: the form posts back to
//! the server, which validates and forwards accepted comments to the
//! moderation endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use headless_blog::comments::CommentGateway;
use headless_blog::config::Config;
use headless_blog::content::{
    ContentClient, POST_BY_SLUG_QUERY, POST_SLUGS_QUERY, POST_SUMMARIES_QUERY,
};
use headless_blog::web::snapshots::SnapshotCache;
use headless_blog::web::{create_app, AppState};

const QUERY_PATH: &str = "/data/query/production";

fn post_json() -> serde_json::Value {
    json!({
        "_id": "post-1",
        "_createdAt": "2024-01-15T12:00:00Z",
        "title": "Hello World",
        "slug": "hello-world",
        "body": [],
        "author": {"name": "Jo Writer"},
        "comments": []
    })
}

async fn mount_store(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_SLUGS_QUERY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": [{"slug": "hello-world"}]})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_BY_SLUG_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": post_json()})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_SUMMARIES_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(server)
        .await;
}

/// Build the real app against a mock store and a mock moderation endpoint.
async fn serve_app(store: &MockServer, moderation: &MockServer) -> Router {
    mount_store(store).await;

    let config = Config {
        api_url: Some(store.uri()),
        comment_endpoint_url: format!("{}/comments", moderation.uri()),
        ..Config::for_testing()
    };
    let client = ContentClient::new(&config).expect("client should build");
    let snapshots = Arc::new(SnapshotCache::new(client, Duration::from_secs(60)));
    snapshots.warm().await.expect("warm failed");

    let state = AppState {
        comments: CommentGateway::new(&config).expect("gateway should build"),
        config: Arc::new(config),
        snapshots,
    };
    create_app(state)
}

async fn post_form(app: &Router, uri: &str, form_body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_valid_comment_is_forwarded_and_thanked() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({
            "_id": "post-1",
            "name": "Ana",
            "email": "ana@example.com",
            "comment": "Lovely post"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, body) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=post-1&name=Ana&email=ana%40example.com&comment=Lovely+post",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("thank you for submit!!"));
    assert!(body.contains("once it has been approved, it will apear below!"));
    // The form is replaced by the notice.
    assert!(!body.contains("Leave comment blow!"));
}

#[tokio::test]
async fn test_tampered_hidden_id_is_replaced_with_the_posts_own() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    // The forwarded _id must be the id of the post at the request path, not
    // whatever the client put in the hidden field.
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({
            "_id": "post-1",
            "name": "Ana",
            "email": "ana@example.com",
            "comment": "Lovely post"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, _) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=some-other-post&name=Ana&email=ana%40example.com&comment=Lovely+post",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_comment_rerenders_with_error_and_no_forward() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, body) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=post-1&name=Ana&email=ana%40example.com&comment=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("- The comment field is required"));
    // The form comes back with the entered values preserved.
    assert!(body.contains("Leave comment blow!"));
    assert!(body.contains("value=\"Ana\""));
    assert!(body.contains("value=\"ana@example.com\""));
}

#[tokio::test]
async fn test_invalid_email_rerenders_with_error() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, body) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=post-1&name=Ana&email=not-an-email&comment=Lovely+post",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("- Enter a valid email address"));
    assert!(body.contains("value=\"not-an-email\""));
}

#[tokio::test]
async fn test_empty_form_shows_errors_in_display_order() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (_, body) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=post-1&name=&email=&comment=",
    )
    .await;

    let name_at = body
        .find("- The name field is required")
        .expect("name error missing");
    let comment_at = body
        .find("- The comment field is required")
        .expect("comment error missing");
    let email_at = body
        .find("- The email field is required")
        .expect("email error missing");
    assert!(name_at < comment_at && comment_at < email_at);
}

#[tokio::test]
async fn test_endpoint_failure_rerenders_form_without_banner() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, body) = post_form(
        &app,
        "/post/hello-world/comment",
        "_id=post-1&name=Ana&email=ana%40example.com&comment=Lovely+post",
    )
    .await;

    // The reader sees the form again, values intact. The failure is logged
    // server-side; nothing on the page announces it.
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Leave comment blow!"));
    assert!(body.contains("value=\"Ana\""));
    assert!(body.contains("Lovely post"));
    assert!(!body.contains("thank you for submit!!"));
    assert!(!body.contains("error-message"));
}

#[tokio::test]
async fn test_comment_for_unknown_post_is_404() {
    let store = MockServer::start().await;
    let moderation = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&moderation)
        .await;

    let app = serve_app(&store, &moderation).await;
    let (status, _) = post_form(
        &app,
        "/post/no-such-post/comment",
        "_id=post-1&name=Ana&email=ana%40example.com&comment=Lovely+post",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
