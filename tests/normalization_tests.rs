use std::time::Duration;

use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use cashpoint_client::{CashPointClient, Endpoint, FailureKind, PARSE_FAILED_MESSAGE, TIMEOUT_MESSAGE};
use common::{ok_body, setup_test_client};

#[tokio::test]
async fn test_html_body_becomes_parse_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/getStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>error</html>"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let envelope = client.machine().get_status().await;

    assert!(!envelope.is_success());
    assert_eq!(envelope.failure, Some(FailureKind::Parse));
    assert_eq!(envelope.message(), PARSE_FAILED_MESSAGE);
    assert_eq!(envelope.to_value(), json!({ "isSuccess": false, "errorMsg": PARSE_FAILED_MESSAGE }));
}

#[tokio::test]
async fn test_proxy_error_page_with_500_is_parse_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/refund"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let envelope = client.cash().refund("100").await;
    assert_eq!(envelope.failure, Some(FailureKind::Parse));
}

#[tokio::test]
async fn test_envelope_on_error_status_is_honoured() {
    // The backend sometimes reports business errors with a non-2xx status; the body decides.
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "isSuccess": false, "errorMsg": "Not logged in" })),
        )
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let envelope = client.login("op1", "secret").await;
    assert_eq!(envelope.failure, Some(FailureKind::Remote));
    assert_eq!(envelope.message(), "Not logged in");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cashInfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body(json!({})))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = CashPointClient::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .expect("Failed to build CashPointClient");

    let envelope = client.cash().get_cash_info().await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.failure, Some(FailureKind::Timeout));
    assert_eq!(envelope.message(), TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    // Bind and drop a listener to get a port nothing is listening on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = setup_test_client(&format!("http://127.0.0.1:{port}"));

    let envelope = client.payments().payment("500").await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.failure, Some(FailureKind::Transport));
    assert!(!envelope.message().is_empty());
}

#[tokio::test]
async fn test_base_url_prefix_is_kept() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cpp/api/getStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(json!({}))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&format!("{}/cpp/", mock_server.uri()));
    assert!(client.machine().get_status().await.is_success());
}

#[tokio::test]
async fn test_raw_request_reaches_registered_endpoint() {
    let mock_server = MockServer::start().await;
    common::expect_call(
        &mock_server,
        "POST",
        "/api/setupSetting",
        Some(json!({ "name": "beep", "value": 0 })),
        ok_body(json!(null)),
    )
    .await;

    let client = setup_test_client(&mock_server.uri());
    let body = json!({ "name": "beep", "value": 0 });
    let envelope = client.raw_request(Method::POST, Endpoint::SetupSetting, Some(&body)).await;
    assert!(envelope.is_success());
}

#[tokio::test]
async fn test_successful_body_is_relayed_unchanged() {
    let bodies = [
        json!({ "isSuccess": true, "errorMsg": null, "data": { "uuid": "abc" } }),
        json!({ "isSuccess": 1, "errorMsg": "", "data": { "uuid": "abc" } }),
        json!({ "isSuccess": true, "errorMsg": 0, "data": null, "serverTime": "2024-05-01 10:00:00" }),
    ];

    for body in bodies {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getStatus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = setup_test_client(&mock_server.uri());
        let envelope = client.machine().get_status().await;

        assert!(envelope.is_success());
        assert_eq!(envelope.to_value(), body);
    }
}
