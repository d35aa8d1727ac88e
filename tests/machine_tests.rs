use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

mod common;

use cashpoint_client::{
    error_codes, DoorState, DoorStates, MachineInfo, SystemStatus, COIN_SECURITY_DOOR, NOTE_DRUM_DOOR,
    NOTE_SECURITY_DOOR,
};
use common::{expect_call, ok_body, setup_test_client};

#[tokio::test]
async fn test_door_control_merges_default_timeout() {
    let mock_server = MockServer::start().await;
    expect_call(
        &mock_server,
        "POST",
        "/api/doorControl",
        Some(json!({
            "Note Security Door": "open",
            "Note Drum Door": "close",
            "Open Timeout": 10
        })),
        ok_body(json!(null)),
    )
    .await;

    let mut doors = DoorStates::new();
    doors.insert(NOTE_SECURITY_DOOR.to_string(), DoorState::Open);
    doors.insert(NOTE_DRUM_DOOR.to_string(), DoorState::Close);

    let client = setup_test_client(&mock_server.uri());
    assert!(client.machine().door_control(&doors, None).await.is_success());
}

#[tokio::test]
async fn test_door_control_with_explicit_timeout() {
    let mock_server = MockServer::start().await;
    expect_call(
        &mock_server,
        "POST",
        "/api/doorControl",
        Some(json!({ "Coin Security Door": "open", "Open Timeout": 45 })),
        ok_body(json!(null)),
    )
    .await;

    let mut doors = DoorStates::new();
    doors.insert(COIN_SECURITY_DOOR.to_string(), DoorState::Open);

    let client = setup_test_client(&mock_server.uri());
    let envelope = client.machine().door_control(&doors, Some(Duration::from_secs(45))).await;
    assert!(envelope.is_success());
}

#[tokio::test]
async fn test_status_reads_are_gets() {
    let mock_server = MockServer::start().await;
    expect_call(
        &mock_server,
        "GET",
        "/api/machineInfo",
        None,
        ok_body(json!({
            "deviceId": "CPP-0042",
            "doorStatus": [{ "name": "Note Security Door", "status": "close" }]
        })),
    )
    .await;
    expect_call(&mock_server, "GET", "/api/sensorStatus", None, ok_body(json!({ "sensors": [] }))).await;
    expect_call(&mock_server, "GET", "/api/cassetteStatus", None, ok_body(json!({ "cassette": "ok" }))).await;
    expect_call(&mock_server, "GET", "/api/resetStatus", None, ok_body(json!(null))).await;

    let client = setup_test_client(&mock_server.uri());
    let machine = client.machine();

    let info: MachineInfo = machine.get_machine_info().await.data_as().unwrap();
    assert_eq!(info.device_id.as_deref(), Some("CPP-0042"));
    assert_eq!(info.door_status.len(), 1);

    assert!(machine.get_sensor_status().await.is_success());
    assert!(machine.get_cassette_status().await.is_success());
    assert!(machine.reset_status().await.is_success());
}

#[tokio::test]
async fn test_get_status_is_idempotent() {
    let mock_server = MockServer::start().await;
    let status = json!({ "Status": "Standby", "Detail": { "Note Error Code": 0, "Coin Error Code": 0 } });
    common::mount_repeated(&mock_server, "GET", "/api/getStatus", ok_body(status.clone()), 2).await;

    let client = setup_test_client(&mock_server.uri());
    let first = client.machine().get_status().await;
    let second = client.machine().get_status().await;

    assert_eq!(first.data(), second.data());
    assert_eq!(first.data(), Some(&status));
    let parsed: SystemStatus = first.data_as().unwrap();
    assert!(!parsed.has_errors());
}

#[tokio::test]
async fn test_error_message_lookup() {
    let mock_server = MockServer::start().await;
    expect_call(
        &mock_server,
        "POST",
        "/api/getErrorMessage",
        Some(json!({ "errorCode": "509" })),
        ok_body(json!({ "message": "drum parameter error" })),
    )
    .await;

    let client = setup_test_client(&mock_server.uri());
    let remote = client.machine().get_error_message("509").await;
    assert_eq!(remote.data(), Some(&json!({ "message": "drum parameter error" })));

    // The local table is independent of the device.
    assert_eq!(
        error_codes::describe_str("509"),
        Some("drumId must be between 1 and 4 and pcs must be at least 1")
    );
}
