//! Integration tests for HTTP transport

use gymdesk_transport::{HttpRequest, HttpTransport, HttpTransportConfig, Transport, TransportError};
use http::header::{AUTHORIZATION, HeaderValue};
use http::Method;
use rstest::rstest;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_request_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":1}]"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().expect("Failed to create HTTP transport");
    let request = HttpRequest::get(format!("{}/api/members?page=2", mock_server.uri()))
        .with_header(AUTHORIZATION, HeaderValue::from_static("Bearer token123"));

    let response = transport.send_http(request).await.expect("request failed");

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), r#"[{"id":1}]"#);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/attendance/mark"))
        .and(body_json(serde_json::json!({"status": "present"})))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new(
        Method::POST,
        format!("{}/api/attendance/mark", mock_server.uri()),
    )
    .with_json(&serde_json::json!({"status": "present"}))
    .unwrap();

    let response = transport.send_http(request).await.unwrap();
    assert!(response.is_success());
}

#[rstest]
#[case(401)]
#[case(404)]
#[case(422)]
#[case(500)]
#[tokio::test]
async fn test_error_status_is_not_a_transport_error(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_body_string(r#"{"message":"nope"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send_http(HttpRequest::get(format!("{}/api/payments", mock_server.uri())))
        .await
        .expect("error statuses come back as responses");

    assert_eq!(response.status, status);
    assert!(response.is_error());
}

#[tokio::test]
async fn test_slow_server_maps_to_timeout_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::with_config(HttpTransportConfig {
        timeout: Duration::from_millis(100),
        ..Default::default()
    })
    .unwrap();

    let err = transport
        .send_http(HttpRequest::get(format!("{}/api/members", mock_server.uri())))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Timeout(d) if d == Duration::from_millis(100)));
    assert!(err.is_timeout());
    mock_server.verify().await;
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let transport = HttpTransport::new().unwrap();
    // Port 9 (discard) on localhost is closed in test environments.
    let err = transport
        .send_http(HttpRequest::get("http://127.0.0.1:9/api/members"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connection(_)));
}
