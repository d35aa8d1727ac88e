//! Operation handlers, one per functional area of the device.
//!
//! Handlers borrow the client and add no state of their own; each method
//! is exactly one request.

pub mod cash;
pub mod machine;
pub mod maintenance;
pub mod payment;
pub mod settings;

pub use cash::CashApi;
pub use machine::MachineApi;
pub use maintenance::MaintenanceApi;
pub use payment::PaymentApi;
pub use settings::SettingsApi;
