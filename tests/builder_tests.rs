use std::time::Duration;

use cashpoint_client::{CashPointClient, CashPointError, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

#[test]
fn test_config_error() {
    // What it tests: builder-time validation of the base URL, before any network I/O.
    let err = CashPointClient::builder().base_url("invalid-url").build().unwrap_err();
    match err {
        CashPointError::ConfigurationError(msg) => assert!(msg.contains("Invalid base URL")),
        other => panic!("Expected ConfigurationError for invalid URL, got {other:?}"),
    }

    let err = CashPointClient::builder().base_url("http://[::1").build().unwrap_err();
    assert!(err.to_string().starts_with("Invalid configuration: Invalid base URL"));

    let err = CashPointClient::builder().base_url("ftp://device.local").build().unwrap_err();
    match err {
        CashPointError::ConfigurationError(msg) => assert!(msg.contains("unsupported scheme")),
        other => panic!("Expected ConfigurationError for scheme, got {other:?}"),
    }

    let err = CashPointClient::builder().base_url("http://device.local/?x=1").build().unwrap_err();
    match err {
        CashPointError::ConfigurationError(msg) => assert!(msg.contains("query or fragment")),
        other => panic!("Expected ConfigurationError for query, got {other:?}"),
    }
}

#[test]
fn test_zero_timeout_rejected() {
    let err = CashPointClient::builder().timeout(Duration::ZERO).build().unwrap_err();
    assert!(matches!(err, CashPointError::ConfigurationError(_)));
}

#[test]
fn test_defaults() {
    let client = CashPointClient::builder().build().expect("defaults are valid");
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_base_url_is_normalized() {
    let client = CashPointClient::builder()
        .base_url(" http://192.168.1.20:8080/ ")
        .build()
        .expect("valid URL");
    assert_eq!(client.base_url(), "http://192.168.1.20:8080");
}

#[test]
fn test_config_applies_all_fields() {
    let config = ClientConfig {
        base_url: "https://cpp.example.com".into(),
        credentials: None,
        timeout: Duration::from_secs(3),
    };
    let client = CashPointClient::builder().config(config).build().expect("valid config");
    assert_eq!(client.base_url(), "https://cpp.example.com");
    assert_eq!(client.timeout(), Duration::from_secs(3));
}
