//! # cashpoint-client
//!
//! A Rust client library for the Cash Point Pay device-control API.
//!
//! The Cash Point Pay server fronts a cash-handling terminal: banknote and
//! coin recyclers, drums, cassettes, hoppers, sensors and door locks. This
//! crate maps each remote operation to one HTTP request and normalizes every
//! answer into an [`Envelope`].
//!
//! ## Failure model
//!
//! Operations never return `Err`. Bad credentials, business errors reported
//! by the device, unparseable responses, unreachable servers and timeouts
//! all come back as an envelope with `is_success == false`, a message and a
//! [`FailureKind`]. Nothing is retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cashpoint_client::{CashPointClient, TransactionDetails};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CashPointClient::builder()
//!         .base_url("http://192.168.1.20:8080")
//!         .build()?;
//!
//!     let login = client.login("op1", "secret").await;
//!     if !login.is_success() {
//!         eprintln!("login failed: {}", login.message());
//!         return Ok(());
//!     }
//!
//!     let started = client.payments().payment("500").await;
//!     if let Some(uuid) = started.uuid() {
//!         let details: TransactionDetails = client.payments().query(uuid).await.data_as()?;
//!         println!("{uuid}: {:?}", details.info.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
mod client;
mod endpoint;
mod envelope;
mod error;
pub mod error_codes;
mod models;
pub mod notify;
mod session;

pub use api::{CashApi, MachineApi, MaintenanceApi, PaymentApi, SettingsApi};
pub use client::{
    CashPointClient, CashPointClientBuilder, ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use endpoint::Endpoint;
pub use envelope::{
    normalize, Envelope, FailureKind, DEFAULT_ERROR_MESSAGE, PARSE_FAILED_MESSAGE, TIMEOUT_MESSAGE,
};
pub use error::{CashPointError, CashPointResult};
pub use models::cash::{withdraw_total, WithdrawItem, DENOMINATIONS};
pub use models::machine::{
    DoorState, DoorStates, DoorStatus, MachineInfo, StatusDetail, SystemStatus, COIN_SECURITY_DOOR,
    DEFAULT_DOOR_TIMEOUT, NOTE_CASSETTE_DOOR, NOTE_DRUM_DOOR, NOTE_SECURITY_DOOR, OPEN_TIMEOUT_KEY,
};
pub use models::maintenance::DrumTransfer;
pub use models::payment::{
    items_total, LineItem, TransactionDetailRow, TransactionDetails, TransactionInfo, TransactionStatus,
};
pub use models::settings::{DeviceSetting, SetupSetting};
pub use session::{Session, TrackOutcome, TransactionKind, TransactionRecord};
