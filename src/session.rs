//! Operator session state.
//!
//! A [`Session`] is an ordinary value owned by whoever drives the console.
//! It is passed to the code that needs it; nothing here is global. It holds
//! only what the operator has seen: the device remains the authority on
//! every transaction.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::client::DEFAULT_BASE_URL;
use crate::{Envelope, TransactionDetails, TransactionStatus};

/// Which kind of operation produced a transaction reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Payment,
    Refill,
    Refund,
    Withdraw,
}

/// A transaction the operator chose to track.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub uuid: String,
    pub timestamp: DateTime<Local>,
    pub status: Option<String>,
    pub amount: i64,
    pub change: i64,
    /// The full `data` of the query that produced this record.
    pub data: Value,
}

impl TransactionRecord {
    pub fn classify(&self) -> TransactionStatus {
        TransactionStatus::classify(self.status.as_deref())
    }
}

/// Outcome of [`Session::track`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Added,
    AlreadyTracked,
    /// The query failed; carries the envelope's message.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
    pub api_base_url: String,
    last_uuids: HashMap<TransactionKind, String>,
    history: Vec<TransactionRecord>,
    snapshots: HashMap<String, Envelope>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(DEFAULT_BASE_URL)
    }
}

impl Session {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Session {
            logged_in: false,
            username: None,
            api_base_url: api_base_url.into(),
            last_uuids: HashMap::new(),
            history: Vec::new(),
            snapshots: HashMap::new(),
        }
    }

    /// Marks the session as logged in if `envelope` is successful.
    /// Returns whether it was.
    pub fn record_login(&mut self, account: &str, envelope: &Envelope) -> bool {
        if envelope.is_success() {
            self.logged_in = true;
            self.username = Some(account.to_string());
        }
        envelope.is_success()
    }

    /// Clears the login flag. Tracked history survives a logout, as it only
    /// disappears with the session itself.
    pub fn record_logout(&mut self) {
        self.logged_in = false;
        self.username = None;
        self.snapshots.clear();
    }

    /// Changes the server the session talks to. Cached snapshots belong to
    /// the old server and are dropped.
    pub fn set_api_base_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        if url != self.api_base_url {
            self.api_base_url = url;
            self.snapshots.clear();
        }
    }

    /// Remembers the transaction reference in `envelope` as the latest one
    /// of `kind`. Returns the stored reference.
    pub fn remember(&mut self, kind: TransactionKind, envelope: &Envelope) -> Option<&str> {
        if !envelope.is_success() {
            return None;
        }
        let uuid = envelope.uuid()?.to_string();
        self.last_uuids.insert(kind, uuid);
        self.last_uuids.get(&kind).map(String::as_str)
    }

    /// The latest transaction reference of `kind`.
    pub fn current(&self, kind: TransactionKind) -> Option<&str> {
        self.last_uuids.get(&kind).map(String::as_str)
    }

    /// Adds the result of querying `uuid` to the history.
    ///
    /// A reference already in the history is not added twice, and a failed
    /// query adds nothing.
    pub fn track(&mut self, uuid: &str, query: &Envelope) -> TrackOutcome {
        if self.is_tracked(uuid) {
            return TrackOutcome::AlreadyTracked;
        }
        if !query.is_success() {
            return TrackOutcome::Failed(query.message().to_string());
        }

        let data = query.data().cloned().unwrap_or(Value::Null);
        let details: TransactionDetails = serde_json::from_value(data.clone()).unwrap_or_default();
        self.history.push(TransactionRecord {
            uuid: uuid.to_string(),
            timestamp: Local::now(),
            status: details.info.status,
            amount: details.info.pay_amount.unwrap_or(0),
            change: details.info.change.unwrap_or(0),
            data,
        });
        TrackOutcome::Added
    }

    pub fn is_tracked(&self, uuid: &str) -> bool {
        self.history.iter().any(|record| record.uuid == uuid)
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn find(&self, uuid: &str) -> Option<&TransactionRecord> {
        self.history.iter().find(|record| record.uuid == uuid)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Caches a read-only response so one render pass does not ask twice.
    pub fn cache_snapshot(&mut self, key: impl Into<String>, envelope: Envelope) {
        self.snapshots.insert(key.into(), envelope);
    }

    pub fn snapshot(&self, key: &str) -> Option<&Envelope> {
        self.snapshots.get(key)
    }

    pub fn invalidate(&mut self, key: &str) -> Option<Envelope> {
        self.snapshots.remove(key)
    }
}
