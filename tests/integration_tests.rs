//! Integration tests using mock HTTP server
//!
//! Tests the full flow: list operation → HTTP transport → typed pages

use futures::StreamExt;
use restpage::error::{ApiError, Error};
use restpage::http::{HttpTransport, HttpTransportConfig, Transport};
use restpage::list::ListOptions;
use restpage::resources::notification::{self, Notification, NotificationFilter};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOTIFICATIONS_PATH: &str = "/2010-04-01/Accounts/AC1/Calls/CA2/Notifications.json";

fn transport_for(server: &MockServer) -> Arc<dyn Transport> {
    let config = HttpTransportConfig::builder()
        .base_url(server.uri())
        .basic_auth("AC1", "token")
        .build();
    Arc::new(HttpTransport::with_config(config).unwrap())
}

fn sids(records: &[Notification]) -> Vec<&str> {
    records.iter().filter_map(|n| n.sid.as_deref()).collect()
}

// ============================================================================
// Execute
// ============================================================================

#[tokio::test]
async fn test_execute_sends_filters_and_decodes_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .and(query_param("Log", "1"))
        .and(query_param("MessageDate", "2024-05-01"))
        .and(query_param("PageSize", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [
                {"sid": "NO1", "log": "1", "error_code": "13227"},
                {"sid": "NO2", "log": "1", "error_code": "13224"}
            ],
            "next_page_uri": null,
            "page": 0,
            "page_size": 50
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let op = notification::list(
        "AC1",
        "CA2",
        NotificationFilter {
            log: Some(1),
            message_date: Some("2024-05-01".to_string()),
        },
        ListOptions::default(),
    );

    let set = op.execute(transport_for(&mock_server)).await.unwrap();
    assert!(set.current_page_meta().next_page_uri.is_none());

    let records = set.try_collect().await.unwrap();
    assert_eq!(sids(&records), vec!["NO1", "NO2"]);
    assert_eq!(records[0].error_code.as_deref(), Some("13227"));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.query(),
        Some("Log=1&MessageDate=2024-05-01&PageSize=50")
    );
}

#[tokio::test]
async fn test_execute_without_filters_sends_only_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .and(query_param_is_missing("Log"))
        .and(query_param_is_missing("MessageDate"))
        .and(query_param("PageSize", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notifications": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let records = op
        .execute(transport_for(&mock_server))
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert!(records.is_empty());
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_follows_relative_cursor_without_adding_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .and(query_param_is_missing("PageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO1"}, {"sid": "NO2"}],
            "next_page_uri": format!("{NOTIFICATIONS_PATH}?Log=1&PageSize=2&Page=1&PageToken=PANO2")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .and(query_param("PageToken", "PANO2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO3"}],
            "next_page_uri": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let op = notification::list(
        "AC1",
        "CA2",
        NotificationFilter {
            log: Some(1),
            message_date: None,
        },
        ListOptions {
            page_size: Some(2),
            limit: None,
        },
    );

    let records = op
        .execute(transport_for(&mock_server))
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(sids(&records), vec!["NO1", "NO2", "NO3"]);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].url.query(), Some("Log=1&PageSize=2"));
    assert_eq!(
        received[1].url.query(),
        Some("Log=1&PageSize=2&Page=1&PageToken=PANO2")
    );
}

#[tokio::test]
async fn test_follows_absolute_meta_cursor() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/v1/page-two", mock_server.uri());

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO1"}],
            "meta": {"page": 0, "page_size": 1, "next_page_url": next, "key": "notifications"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/page-two"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO2"}],
            "meta": {"page": 1, "page_size": 1, "next_page_url": null, "key": "notifications"}
        })))
        .mount(&mock_server)
        .await;

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let set = op.execute(transport_for(&mock_server)).await.unwrap();
    let items: Vec<_> = set.into_stream().collect().await;

    let records: Vec<Notification> = items.into_iter().map(Result::unwrap).collect();
    assert_eq!(sids(&records), vec!["NO1", "NO2"]);
}

#[tokio::test]
async fn test_next_page_directly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cursor.json"))
        .and(query_param("Page", "3"))
        .and(query_param_is_missing("PageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO9"}],
            "next_page_uri": "/cursor.json?Page=4"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());

    let page = op
        .next_page("/cursor.json?Page=3", transport.as_ref())
        .await
        .unwrap();

    assert_eq!(sids(page.records()), vec!["NO9"]);
    assert_eq!(page.next_page_uri(), Some("/cursor.json?Page=4"));
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "message": "m",
            "code": 123,
            "more_info": "u",
            "status": 429
        })))
        .mount(&mock_server)
        .await;

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let err = op.execute(transport_for(&mock_server)).await.unwrap_err();

    assert_eq!(
        err,
        Error::Api(ApiError {
            message: "m".to_string(),
            code: Some(123),
            more_info: Some("u".to_string()),
            status: Some(429),
        })
    );
}

#[tokio::test]
async fn test_empty_error_body_maps_to_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let err = op.execute(transport_for(&mock_server)).await.unwrap_err();

    assert_eq!(err, Error::Api(ApiError::new("Server Error, no content")));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = HttpTransportConfig::builder()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_secs(2))
        .build();
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_config(config).unwrap());

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let err = op.execute(transport).await.unwrap_err();

    assert!(err.is_connection());
    assert_eq!(err.to_string(), "Unable to connect to server");
}

#[tokio::test]
async fn test_error_on_second_page_ends_iteration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NOTIFICATIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notifications": [{"sid": "NO1"}],
            "next_page_uri": "/expired.json"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/expired.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid PageToken",
            "code": 20001,
            "status": 400
        })))
        .mount(&mock_server)
        .await;

    let op = notification::list("AC1", "CA2", NotificationFilter::default(), ListOptions::default());
    let mut set = op.execute(transport_for(&mock_server)).await.unwrap();

    assert_eq!(
        set.next().await.unwrap().unwrap().sid.as_deref(),
        Some("NO1")
    );
    let err = set.next().await.unwrap().unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.message, "Invalid PageToken");
    assert_eq!(api.code, Some(20001));
    assert!(api.more_info.is_none());
    assert!(set.next().await.is_none());
}
