use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CashPointError;

/// Key under which the door open timeout travels in a door control body.
pub const OPEN_TIMEOUT_KEY: &str = "Open Timeout";

/// Door open timeout used when none is given.
pub const DEFAULT_DOOR_TIMEOUT: Duration = Duration::from_secs(10);

pub const NOTE_SECURITY_DOOR: &str = "Note Security Door";
pub const NOTE_DRUM_DOOR: &str = "Note Drum Door";
pub const NOTE_CASSETTE_DOOR: &str = "Note Cassette Door";
pub const COIN_SECURITY_DOOR: &str = "Coin Security Door";

/// Requested state of one door lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Close,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorState::Open => f.write_str("open"),
            DoorState::Close => f.write_str("close"),
        }
    }
}

impl FromStr for DoorState {
    type Err = CashPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(DoorState::Open),
            "close" | "closed" => Ok(DoorState::Close),
            other => Err(CashPointError::ConfigurationError(format!("Unknown door state '{other}'"))),
        }
    }
}

/// Door name to requested state.
pub type DoorStates = BTreeMap<String, DoorState>;

/// Builds the door control body: every door state plus the open timeout in
/// whole seconds.
pub(crate) fn door_control_body(doors: &DoorStates, timeout: Duration) -> Map<String, Value> {
    let mut body: Map<String, Value> =
        doors.iter().map(|(name, state)| (name.clone(), Value::String(state.to_string()))).collect();
    body.insert(OPEN_TIMEOUT_KEY.to_string(), Value::from(timeout.as_secs()));
    body
}

/// State of one door as reported in machine info.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DoorStatus {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Typed view over the `data` of `get_machine_info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineInfo {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub door_status: Vec<DoorStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error codes of the note and coin modules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusDetail {
    #[serde(rename = "Note Error Code", default)]
    pub note_error_code: i64,
    #[serde(rename = "Coin Error Code", default)]
    pub coin_error_code: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view over the `data` of `get_status`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemStatus {
    #[serde(rename = "Detail", default)]
    pub detail: StatusDetail,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SystemStatus {
    /// Whether either module reports a non-zero error code.
    pub fn has_errors(&self) -> bool {
        self.detail.note_error_code != 0 || self.detail.coin_error_code != 0
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorMessageRequest<'a> {
    pub error_code: &'a str,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn door_body_merges_timeout() {
        let mut doors = DoorStates::new();
        doors.insert(NOTE_SECURITY_DOOR.into(), DoorState::Open);
        doors.insert(COIN_SECURITY_DOOR.into(), DoorState::Close);

        let body = door_control_body(&doors, Duration::from_secs(25));
        assert_eq!(
            Value::Object(body),
            json!({
                "Note Security Door": "open",
                "Coin Security Door": "close",
                "Open Timeout": 25
            })
        );
    }

    #[test]
    fn door_state_parses_operator_input() {
        assert_eq!("OPEN".parse::<DoorState>().unwrap(), DoorState::Open);
        assert_eq!("closed".parse::<DoorState>().unwrap(), DoorState::Close);
        assert!("ajar".parse::<DoorState>().is_err());
    }

    #[test]
    fn status_reports_module_errors() {
        let status: SystemStatus = serde_json::from_value(json!({
            "Status": "Standby",
            "Detail": { "Note Error Code": 0, "Coin Error Code": 17 }
        }))
        .unwrap();
        assert!(status.has_errors());
        assert_eq!(status.extra.get("Status"), Some(&json!("Standby")));

        let idle: SystemStatus = serde_json::from_value(json!({})).unwrap();
        assert!(!idle.has_errors());
    }

    #[test]
    fn machine_info_reads_doors() {
        let info: MachineInfo = serde_json::from_value(json!({
            "deviceId": "CPP-0042",
            "doorStatus": [{ "name": "Note Drum Door", "status": "close" }]
        }))
        .unwrap();
        assert_eq!(info.device_id.as_deref(), Some("CPP-0042"));
        assert_eq!(info.door_status[0].status.as_deref(), Some("close"));
    }
}
