//! The uniform response envelope and its normalizer.
//!
//! Every Cash Point Pay endpoint answers with
//! `{"isSuccess": bool, "errorMsg": string, "data": any}`. The client turns
//! every outcome, including transport failures and unparseable bodies, into
//! one [`Envelope`] so callers only ever branch on [`Envelope::is_success`].

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{CashPointError, CashPointResult};

/// Message used when the backend reports failure without an `errorMsg`.
pub const DEFAULT_ERROR_MESSAGE: &str = "unknown error";

/// Message used when a response body is not a JSON object.
pub const PARSE_FAILED_MESSAGE: &str = "response parse failed";

/// Message used when a request exceeded the configured timeout.
pub const TIMEOUT_MESSAGE: &str = "request timed out";

const IS_SUCCESS_KEY: &str = "isSuccess";
const ERROR_MSG_KEY: &str = "errorMsg";
const DATA_KEY: &str = "data";

/// Why an envelope is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered with `isSuccess` false or absent.
    Remote,
    /// The body was not a JSON object.
    Parse,
    /// The request never completed (connection refused, DNS, I/O).
    Transport,
    /// The request did not complete within the configured timeout.
    Timeout,
}

/// Normalized result of one API call.
///
/// Serializes to the wire shape `{"isSuccess", "errorMsg", "data", ...}`.
/// A successful response serializes back to exactly the object the server
/// sent, including a truthy non-bool `isSuccess` or an `"errorMsg": null`.
/// Deserializing applies the same rules as [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Whether the backend accepted the operation.
    pub is_success: bool,

    /// Failure message. Always set on negative envelopes.
    pub error_msg: Option<String>,

    /// Operation-specific payload, passed through as received.
    pub data: Option<Value>,

    /// Any other top-level fields the backend sent.
    pub extra: Map<String, Value>,

    /// Classification of a negative envelope; `None` on success.
    pub failure: Option<FailureKind>,

    /// `isSuccess` and `errorMsg` as a successful response carried them.
    wire_fields: Map<String, Value>,
}

impl Envelope {
    /// Builds a successful envelope carrying `data`.
    pub fn success(data: Option<Value>) -> Self {
        Envelope {
            is_success: true,
            error_msg: None,
            data,
            extra: Map::new(),
            failure: None,
            wire_fields: Map::new(),
        }
    }

    /// Builds a negative envelope of the given kind.
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Envelope {
            is_success: false,
            error_msg: Some(message.into()),
            data: None,
            extra: Map::new(),
            failure: Some(kind),
            wire_fields: Map::new(),
        }
    }

    /// The negative envelope for an unparseable body.
    pub fn parse_failed() -> Self {
        Envelope::failure(FailureKind::Parse, PARSE_FAILED_MESSAGE)
    }

    /// Maps a reqwest error to a `Timeout` or `Transport` envelope.
    pub fn from_transport_error(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Envelope::failure(FailureKind::Timeout, TIMEOUT_MESSAGE)
        } else {
            Envelope::failure(FailureKind::Transport, format!("request failed: {err}"))
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// The failure message, or the default one if the backend sent none.
    pub fn message(&self) -> &str {
        self.error_msg.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE)
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The transaction reference (`data.uuid`) returned by pay, refund,
    /// refill and withdraw style operations.
    pub fn uuid(&self) -> Option<&str> {
        self.data.as_ref()?.get("uuid")?.as_str()
    }

    /// Decodes `data` into a typed view.
    ///
    /// # Errors
    ///
    /// Returns [`CashPointError::ApiError`] for a negative envelope,
    /// [`CashPointError::MissingData`] when a successful envelope has no
    /// payload, and [`CashPointError::SerializationError`] when the payload
    /// does not match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> CashPointResult<T> {
        if !self.is_success {
            return Err(CashPointError::ApiError(self.message().to_string()));
        }
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| CashPointError::MissingData("No data returned from API".into()))?;
        Ok(serde_json::from_value(data.clone())?)
    }

    /// Converts the envelope into a `Result` for callers who prefer `?`.
    pub fn into_result(self) -> CashPointResult<Option<Value>> {
        if self.is_success {
            Ok(self.data)
        } else {
            Err(CashPointError::ApiError(self.message().to_string()))
        }
    }

    /// The envelope in its wire shape.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Normalizes a raw HTTP response into an [`Envelope`].
///
/// The HTTP status does not decide the outcome: the backend reports its
/// failures inside the envelope and sometimes does so with non-2xx codes.
/// This function has no side effects.
pub fn normalize(_status: StatusCode, body: &[u8]) -> Envelope {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Envelope::from_object(object),
        _ => Envelope::parse_failed(),
    }
}

impl Envelope {
    fn from_object(mut object: Map<String, Value>) -> Envelope {
        let raw_flag = object.remove(IS_SUCCESS_KEY);
        let raw_msg = object.remove(ERROR_MSG_KEY);
        let data = object.remove(DATA_KEY);

        let is_success = raw_flag.as_ref().is_some_and(is_truthy);
        let error_msg = match &raw_msg {
            None | Some(Value::Null) => None,
            Some(Value::String(msg)) => Some(msg.clone()),
            Some(other) => Some(other.to_string()),
        };

        if is_success {
            let mut wire_fields = Map::new();
            if let Some(flag) = raw_flag {
                wire_fields.insert(IS_SUCCESS_KEY.to_string(), flag);
            }
            if let Some(msg) = raw_msg {
                wire_fields.insert(ERROR_MSG_KEY.to_string(), msg);
            }
            return Envelope {
                is_success,
                error_msg,
                data,
                extra: object,
                failure: None,
                wire_fields,
            };
        }

        Envelope {
            is_success,
            error_msg: Some(error_msg.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())),
            data,
            extra: object,
            failure: Some(FailureKind::Remote),
            wire_fields: Map::new(),
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self.wire_fields.get(IS_SUCCESS_KEY) {
            Some(flag) => map.serialize_entry(IS_SUCCESS_KEY, flag)?,
            None => map.serialize_entry(IS_SUCCESS_KEY, &self.is_success)?,
        }
        match (self.wire_fields.get(ERROR_MSG_KEY), &self.error_msg) {
            (Some(msg), _) => map.serialize_entry(ERROR_MSG_KEY, msg)?,
            (None, Some(msg)) => map.serialize_entry(ERROR_MSG_KEY, msg)?,
            (None, None) => {}
        }
        if let Some(data) = &self.data {
            map.serialize_entry(DATA_KEY, data)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Envelope::from_object)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
