use serde::Serialize;

/// Move `pcs` banknotes from drum `drum_id` to the cassette.
///
/// The device accepts drum ids 1 to 4 and `pcs >= 1`; out of range values are
/// still sent and rejected remotely with code 509.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrumTransfer {
    pub drum_id: i64,
    pub pcs: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClearHopperRequest {
    pub hopper_id: i64,
}
