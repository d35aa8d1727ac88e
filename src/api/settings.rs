use http::Method;
use serde::Serialize;

use crate::models::settings::{DeviceSetting, SetupSetting};
use crate::{CashPointClient, Endpoint, Envelope};

/// Device configuration.
///
/// The denomination and coin tube setups are lists whose entry shape is
/// owned by the device; `set_*` sends the list as the request body, so the
/// typical round trip is to read with `get_*`, edit the entries and write
/// them back.
#[derive(Debug, Clone, Copy)]
pub struct SettingsApi<'a> {
    client: &'a CashPointClient,
}

impl<'a> SettingsApi<'a> {
    pub(crate) fn new(client: &'a CashPointClient) -> Self {
        Self { client }
    }

    pub async fn get_banknote_denomination_setup(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::BanknoteDenominationSetup, None::<&()>).await
    }

    pub async fn set_banknote_denomination_setup<T: Serialize>(&self, settings: &[T]) -> Envelope {
        self.client.send(Method::POST, Endpoint::BanknoteDenominationSetup, Some(settings)).await
    }

    pub async fn get_coin_tube_setup(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::CoinTubeSetup, None::<&()>).await
    }

    pub async fn set_coin_tube_setup<T: Serialize>(&self, settings: &[T]) -> Envelope {
        self.client.send(Method::POST, Endpoint::CoinTubeSetup, Some(settings)).await
    }

    /// Binds `device_id` to the URL it should report to.
    pub async fn set_device_setting(&self, device_id: &str, url: &str) -> Envelope {
        self.client.send(Method::POST, Endpoint::SetDeviceSetting, Some(&DeviceSetting { device_id, url })).await
    }

    /// Sets a named integer user setting.
    pub async fn setup_setting(&self, name: &str, value: i64) -> Envelope {
        self.client.send(Method::POST, Endpoint::SetupSetting, Some(&SetupSetting { name, value })).await
    }
}
