use serde::Serialize;

/// Binds a device id to the URL the device should report to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSetting<'a> {
    pub device_id: &'a str,
    pub url: &'a str,
}

/// A named integer user setting.
#[derive(Debug, Clone, Serialize)]
pub struct SetupSetting<'a> {
    pub name: &'a str,
    pub value: i64,
}
