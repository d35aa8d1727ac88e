//! Registry of the remote API paths.

use std::fmt;

/// A remote operation's path on the Cash Point Pay server.
///
/// Each variant maps to exactly one fixed path. The banknote and coin tube
/// setup endpoints serve both reads (GET) and writes (POST) on the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Logout,
    Pay,
    Payment,
    PosPay,
    PosPayment,
    Query,
    MachineInfo,
    DoorControl,
    CashInfo,
    CashDetailInfo,
    Refill,
    RefillEnd,
    Refund,
    Withdraw,
    Cancel,
    PaymentStop,
    PaymentContinue,
    SensorStatus,
    CassetteStatus,
    GetStatus,
    ResetStatus,
    GetErrorMessage,
    PdCalibration,
    ResetCassette,
    ResetCoinBox,
    DrumToCassette,
    SelfTest,
    ClearHopper,
    BanknoteDenominationSetup,
    CoinTubeSetup,
    SetDeviceSetting,
    SetupSetting,
}

impl Endpoint {
    /// Every registered endpoint.
    pub const ALL: [Endpoint; 33] = [
        Endpoint::Login,
        Endpoint::Logout,
        Endpoint::Pay,
        Endpoint::Payment,
        Endpoint::PosPay,
        Endpoint::PosPayment,
        Endpoint::Query,
        Endpoint::MachineInfo,
        Endpoint::DoorControl,
        Endpoint::CashInfo,
        Endpoint::CashDetailInfo,
        Endpoint::Refill,
        Endpoint::RefillEnd,
        Endpoint::Refund,
        Endpoint::Withdraw,
        Endpoint::Cancel,
        Endpoint::PaymentStop,
        Endpoint::PaymentContinue,
        Endpoint::SensorStatus,
        Endpoint::CassetteStatus,
        Endpoint::GetStatus,
        Endpoint::ResetStatus,
        Endpoint::GetErrorMessage,
        Endpoint::PdCalibration,
        Endpoint::ResetCassette,
        Endpoint::ResetCoinBox,
        Endpoint::DrumToCassette,
        Endpoint::SelfTest,
        Endpoint::ClearHopper,
        Endpoint::BanknoteDenominationSetup,
        Endpoint::CoinTubeSetup,
        Endpoint::SetDeviceSetting,
        Endpoint::SetupSetting,
    ];

    /// The path of this endpoint relative to the server base URL.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/api/login",
            Endpoint::Logout => "/api/logOut",
            Endpoint::Pay => "/api/pay",
            Endpoint::Payment => "/api/payment",
            Endpoint::PosPay => "/api/POS/pay",
            Endpoint::PosPayment => "/api/POS/payment",
            Endpoint::Query => "/api/query",
            Endpoint::MachineInfo => "/api/machineInfo",
            Endpoint::DoorControl => "/api/doorControl",
            Endpoint::CashInfo => "/api/cashInfo",
            Endpoint::CashDetailInfo => "/api/cashDetailInfo",
            Endpoint::Refill => "/api/refill",
            Endpoint::RefillEnd => "/api/refillend",
            Endpoint::Refund => "/api/refund",
            Endpoint::Withdraw => "/api/withdraw",
            Endpoint::Cancel => "/api/cancel",
            Endpoint::PaymentStop => "/api/paymentStop",
            Endpoint::PaymentContinue => "/api/paymentContinue",
            Endpoint::SensorStatus => "/api/sensorStatus",
            Endpoint::CassetteStatus => "/api/cassetteStatus",
            Endpoint::GetStatus => "/api/getStatus",
            Endpoint::ResetStatus => "/api/resetStatus",
            Endpoint::GetErrorMessage => "/api/getErrorMessage",
            Endpoint::PdCalibration => "/api/pdCalibration",
            Endpoint::ResetCassette => "/api/resetCassette",
            Endpoint::ResetCoinBox => "/api/resetCoinBox",
            Endpoint::DrumToCassette => "/api/drumToCassette",
            Endpoint::SelfTest => "/api/selfTest",
            Endpoint::ClearHopper => "/api/clearHopper",
            Endpoint::BanknoteDenominationSetup => "/api/banknoteDenominationSetup",
            Endpoint::CoinTubeSetup => "/api/coinTubeSetup",
            Endpoint::SetDeviceSetting => "/api/setDeviceSetting",
            Endpoint::SetupSetting => "/api/setupSetting",
        }
    }

    /// Builds the full URL for this endpoint.
    ///
    /// This is plain concatenation: a base URL carrying a path prefix
    /// (`http://host/cpp`) keeps it. A trailing `/` on the base is dropped
    /// so the result never contains `//api`.
    pub fn resolve(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Looks up an endpoint by its path.
    pub fn from_path(path: &str) -> Option<Endpoint> {
        Endpoint::ALL.iter().copied().find(|e| e.path() == path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn resolve_concatenates_base_and_path() {
        assert_eq!(Endpoint::Login.resolve("http://localhost:8080"), "http://localhost:8080/api/login");
        assert_eq!(Endpoint::PosPay.resolve("http://10.0.0.5:8080/"), "http://10.0.0.5:8080/api/POS/pay");
        assert_eq!(
            Endpoint::RefillEnd.resolve("https://gw.example.com/cpp"),
            "https://gw.example.com/cpp/api/refillend"
        );
    }

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<&str> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn from_path_round_trips_every_variant() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_path(endpoint.path()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_path("/api/unknown"), None);
    }
}
