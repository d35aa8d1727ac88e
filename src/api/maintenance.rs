use http::Method;

use crate::models::maintenance::ClearHopperRequest;
use crate::{CashPointClient, DrumTransfer, Endpoint, Envelope};

/// Maintenance commands for the banknote and coin modules.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceApi<'a> {
    client: &'a CashPointClient,
}

impl<'a> MaintenanceApi<'a> {
    pub(crate) fn new(client: &'a CashPointClient) -> Self {
        Self { client }
    }

    /// Calibrates the banknote position detector.
    pub async fn pd_calibration(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::PdCalibration, None::<&()>).await
    }

    /// Resets the cassette counter.
    pub async fn reset_cassette(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::ResetCassette, None::<&()>).await
    }

    /// Resets the coin box counter.
    pub async fn reset_coin_box(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::ResetCoinBox, None::<&()>).await
    }

    /// Runs the banknote and coin module self test.
    pub async fn self_test(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::SelfTest, None::<&()>).await
    }

    /// Empties a coin hopper.
    pub async fn clear_hopper(&self, hopper_id: i64) -> Envelope {
        self.client.send(Method::POST, Endpoint::ClearHopper, Some(&ClearHopperRequest { hopper_id })).await
    }

    /// Moves `pcs` banknotes from a drum to the cassette. Ranges are checked
    /// by the device, not here.
    pub async fn drum_to_cassette(&self, drum_id: i64, pcs: i64) -> Envelope {
        self.client.send(Method::POST, Endpoint::DrumToCassette, Some(&DrumTransfer { drum_id, pcs })).await
    }
}
