//! Integration tests for the content store client, against a mock server.

use headless_blog::config::Config;
use headless_blog::content::{
    ContentClient, ContentError, POST_BY_SLUG_QUERY, POST_SLUGS_QUERY, POST_SUMMARIES_QUERY,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/data/query/production";

fn test_client(server: &MockServer) -> ContentClient {
    let config = Config {
        api_url: Some(server.uri()),
        ..Config::for_testing()
    };
    ContentClient::new(&config).expect("client should build")
}

fn full_post_json() -> serde_json::Value {
    json!({
        "_id": "post-1",
        "_createdAt": "2024-01-15T12:00:00Z",
        "title": "Hello World",
        "slug": "hello-world",
        "description": "An opening post",
        "mainImage": {"asset": {"_ref": "image-cover123-800x600-jpg"}},
        "body": [
            {
                "_type": "block",
                "style": "normal",
                "children": [{"_type": "span", "text": "First paragraph."}]
            },
            {
                "_type": "block",
                "style": "h2",
                "children": [{"_type": "span", "text": "A heading"}]
            }
        ],
        "author": {"name": "Jo Writer", "image": {"asset": {"_ref": "image-face456-200x200-png"}}},
        "comments": [
            {"_id": "c1", "name": "Reader", "comment": "Nice!", "approved": true}
        ]
    })
}

#[tokio::test]
async fn test_fetch_post_by_slug_decodes_envelope() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_BY_SLUG_QUERY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"result": full_post_json(), "ms": 5})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let post = client
        .fetch_post_by_slug("hello-world")
        .await
        .expect("fetch failed")
        .expect("post should exist");

    assert_eq!(post.id, "post-1");
    assert_eq!(post.title, "Hello World");
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.author.name, "Jo Writer");
    assert_eq!(post.body.len(), 2);
    assert_eq!(post.comments.len(), 1);
    assert!(post.comments[0].approved);
}

#[tokio::test]
async fn test_fetch_post_by_slug_binds_slug_parameter() {
    let mock_server = MockServer::start().await;
    // The slug must travel as a JSON-encoded $slug parameter, never spliced
    // into the query text.
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_BY_SLUG_QUERY))
        .and(query_param("$slug", "\"hello-world\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let post = client
        .fetch_post_by_slug("hello-world")
        .await
        .expect("fetch failed");
    assert!(post.is_none());

    assert!(!POST_BY_SLUG_QUERY.contains("hello-world"));
    assert!(POST_BY_SLUG_QUERY.contains("$slug"));
}

#[tokio::test]
async fn test_fetch_post_by_slug_null_result_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let post = client
        .fetch_post_by_slug("no-such-post")
        .await
        .expect("fetch failed");
    assert!(post.is_none());
}

#[tokio::test]
async fn test_fetch_post_slugs_skips_entries_without_slug() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_SLUGS_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"slug": "first-post"},
                {"slug": null},
                {"slug": "second-post"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let slugs = client.fetch_post_slugs().await.expect("fetch failed");
    assert_eq!(slugs, vec!["first-post", "second-post"]);
}

#[tokio::test]
async fn test_fetch_post_summaries_preserves_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", POST_SUMMARIES_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {
                    "_id": "post-2",
                    "_createdAt": "2024-02-01T00:00:00Z",
                    "title": "Newer",
                    "slug": "newer",
                    "author": {"name": "Jo Writer"}
                },
                {
                    "_id": "post-1",
                    "_createdAt": "2024-01-15T12:00:00Z",
                    "title": "Older",
                    "slug": "older",
                    "author": {"name": "Jo Writer"}
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let summaries = client.fetch_post_summaries().await.expect("fetch failed");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].slug, "newer");
    assert_eq!(summaries[1].slug, "older");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_post_by_slug("hello-world")
        .await
        .expect_err("should fail");

    match err {
        ContentError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .fetch_post_by_slug("hello-world")
        .await
        .expect_err("should fail");
    assert!(matches!(err, ContentError::Decode(_)));
}
