//! Backend error codes and their fixed descriptions.
//!
//! For diagnostics display only. The client never validates requests
//! against these; the device decides and reports.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Every documented backend error code with its description.
pub const ERROR_CODES: &[(u16, &str)] = &[
    (400, "Invalid account or password"),
    (401, "Not logged in"),
    (500, "Unknown error"),
    (501, "Invalid format"),
    (502, "Please switch to the home page"),
    (503, "UUID does not exist"),
    (504, "This API is not a recharge"),
    (505, "Motor is running, please try again later"),
    (506, "Insufficient inventory"),
    (507, "No transaction in progress"),
    (508, "Banknote module is not ready, please try again later"),
    (509, "drumId must be between 1 and 4 and pcs must be at least 1"),
    (510, "Drum holds no banknotes, not enough to complete the action"),
    (511, "Configuration in progress, cancel the configuration first"),
    (512, "Transaction in progress, cancel or stop the transaction first"),
    (513, "Amount must be greater than 0"),
    (514, "Coin module is not ready, please try again later"),
    (515, "Another API is currently in use"),
];

static BY_CODE: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| ERROR_CODES.iter().copied().collect());

/// Looks up the description of a backend error code.
pub fn describe(code: u16) -> Option<&'static str> {
    BY_CODE.get(&code).copied()
}

/// Looks up a code given as text, as operators type it (`" 509"`).
pub fn describe_str(code: &str) -> Option<&'static str> {
    code.trim().parse().ok().and_then(describe)
}
