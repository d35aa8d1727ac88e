use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cashpoint_client::CashPointClient;

/// Builds a client against the mock server with a short timeout.
#[allow(dead_code)]
pub fn setup_test_client(server_url: &str) -> CashPointClient {
    CashPointClient::builder()
        .base_url(server_url)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build CashPointClient")
}

#[allow(dead_code)]
pub fn ok_body(data: Value) -> Value {
    json!({ "isSuccess": true, "errorMsg": "", "data": data })
}

#[allow(dead_code)]
pub fn error_body(msg: &str) -> Value {
    json!({ "isSuccess": false, "errorMsg": msg })
}

/// Mounts a mock that answers `verb path` (with exactly `body`, when given)
/// once with `response`.
#[allow(dead_code)]
pub async fn expect_call(server: &MockServer, verb: &str, endpoint: &str, body: Option<Value>, response: Value) {
    let mock = Mock::given(method(verb)).and(path(endpoint));
    let mock = match body {
        Some(body) => mock.and(body_json(body)),
        None => mock,
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a bodiless mock that must be hit exactly `times` times.
#[allow(dead_code)]
pub async fn mount_repeated(server: &MockServer, verb: &str, endpoint: &str, response: Value, times: u64) {
    Mock::given(method(verb))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(times)
        .mount(server)
        .await;
}
