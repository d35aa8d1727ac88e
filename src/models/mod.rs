//! Data models for the Cash Point Pay API.
//!
//! Request bodies mirror the backend's JSON keys exactly. Response views
//! are lenient: the device owns the payload shape, so every field is
//! optional or defaulted and unknown fields are kept.

pub mod auth;
pub mod cash;
pub mod machine;
pub mod maintenance;
pub mod payment;
pub mod settings;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an integer, a float with no fractional part or a numeric string.
/// The device reports amounts both ways.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
