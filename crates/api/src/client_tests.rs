use std::time::Duration;

use seamart_core::{ContentType, FeedQuery};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{FeedClient, truncate};
use crate::error::ApiError;
use crate::source::{FeedSource, SearchSource};

fn create_test_client(server: &MockServer) -> FeedClient {
    FeedClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn docs(ids: &[&str]) -> serde_json::Value {
    let docs: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "_id": id,
                "type": "product",
                "name": {"en": format!("Catch {id}")},
                "isActive": true
            })
        })
        .collect();
    serde_json::json!({
        "docs": docs,
        "totalDocs": 42,
        "page": 1,
        "limit": 10,
        "hasNextPage": true
    })
}

#[tokio::test]
async fn feed_page_sends_pagination_and_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "3"))
        .and(query_param("filter", "shop,user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs(&["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let items = client
        .fetch_feed(&FeedQuery::new(2, 3, Some("shop,user".to_owned())))
        .await
        .unwrap();

    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(items[0].content_type, ContentType::Product);
}

#[tokio::test]
async fn feed_page_without_filter_omits_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param_is_missing("filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let items = client.fetch_feed(&FeedQuery::new(1, 10, None)).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn base_url_path_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs(&["x"])))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        FeedClient::new(&format!("{}/api/v2/", server.uri()), Duration::from_secs(5)).unwrap();
    let items = client.fetch_feed(&FeedQuery::new(1, 10, None)).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs(&["a"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server).with_token(Some("test-token".to_owned()));
    client.fetch_feed(&FeedQuery::new(1, 10, None)).await.unwrap();
}

#[tokio::test]
async fn server_error_is_transient_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.fetch_feed(&FeedQuery::new(1, 10, None)).await.unwrap_err();
    assert!(err.is_transient());
    let msg = err.to_string();
    assert!(msg.contains("503"));
    assert!(msg.contains("Service Unavailable"));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.fetch_feed(&FeedQuery::new(1, 10, None)).await.unwrap_err();
    assert!(matches!(err, ApiError::JsonParse { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn search_sends_trimmed_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "tuna"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"_id": "t1", "name": "Tuna"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let items = client.search("  tuna ", 5).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].display_name("en"), "Tuna");
}

#[tokio::test]
async fn blank_search_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let client = create_test_client(&server);
    let err = client.search("   ", 5).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
}

#[tokio::test]
async fn fetch_item_maps_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "p-1",
            "name": {"en": "Prawns"},
            "shop": "s-1"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let item = client.fetch_item("p-1").await.unwrap();
    assert_eq!(item.shop.map(|s| s.id), Some("s-1".to_owned()));

    let err = client.fetch_item("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn invalid_base_url_fails_construction() {
    let err = FeedClient::new("not a url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, ApiError::ClientInit(_)));
}

#[test]
fn debug_redacts_token() {
    let client = FeedClient::new("http://localhost:1", Duration::from_secs(1))
        .unwrap()
        .with_token(Some("super-secret".to_owned()));
    let dbg = format!("{client:?}");
    assert!(!dbg.contains("super-secret"));
    assert!(dbg.contains("***"));
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("héllo", 2), "h");
}
