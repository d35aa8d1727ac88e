use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient_i64;

/// One line of an itemized payment.
///
/// The client does not validate items; an empty name or zero quantity is
/// relayed to the backend, which decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name shown on the device.
    pub name: String,
    /// Quantity.
    pub pcs: u32,
    /// Unit price in the smallest currency unit.
    pub price: u64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, pcs: u32, price: u64) -> Self {
        LineItem {
            name: name.into(),
            pcs,
            price,
        }
    }

    /// `pcs × price`.
    pub fn subtotal(&self) -> u64 {
        u64::from(self.pcs).saturating_mul(self.price)
    }

    /// Whether every field an operator must fill in has a value.
    pub fn is_filled(&self) -> bool {
        !self.name.trim().is_empty() && self.pcs > 0
    }
}

/// Sum of the subtotals of `items`, as displayed before submitting.
pub fn items_total(items: &[LineItem]) -> u64 {
    items.iter().map(LineItem::subtotal).fold(0, u64::saturating_add)
}

#[derive(Debug, Serialize)]
pub(crate) struct PayRequest<'a> {
    pub items: &'a [LineItem],
}

#[derive(Debug, Serialize)]
pub(crate) struct PaymentRequest<'a> {
    pub amount: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PosPayRequest<'a> {
    pub items: &'a [LineItem],
    #[serde(rename = "POS_reference_number")]
    pub pos_reference_number: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PosPaymentRequest<'a> {
    pub amount: &'a str,
    #[serde(rename = "POS_reference_number")]
    pub pos_reference_number: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub uuid: &'a str,
}

/// Coarse classification of a transaction's reported status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// The device is still collecting or dispensing.
    InProgress,
    /// Finished normally.
    Completed,
    /// Ended in error, cancelled by the user or unable to give change.
    Failed,
    /// The device did not report a status.
    Unknown,
}

impl TransactionStatus {
    pub fn classify(status: Option<&str>) -> Self {
        match status {
            None => TransactionStatus::Unknown,
            Some("Payment Error" | "user cancelled" | "no change") => TransactionStatus::Failed,
            Some("paying" | "processing") => TransactionStatus::InProgress,
            Some(_) => TransactionStatus::Completed,
        }
    }
}

/// Summary block of a queried transaction (`data.info`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub pay_amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub change: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionInfo {
    pub fn classify(&self) -> TransactionStatus {
        TransactionStatus::classify(self.status.as_deref())
    }
}

/// One row of a transaction's denomination breakdown (`data.detail`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionDetailRow {
    #[serde(default)]
    pub denomination: Option<Value>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub pcs: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view over the `data` of a `query` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionDetails {
    #[serde(default)]
    pub info: TransactionInfo,
    #[serde(default)]
    pub pay: Vec<Value>,
    #[serde(default)]
    pub detail: Vec<TransactionDetailRow>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn totals_sum_quantity_times_price() {
        let items = vec![LineItem::new("coffee", 2, 350), LineItem::new("bagel", 1, 280)];
        assert_eq!(items_total(&items), 980);
        assert_eq!(items_total(&[]), 0);
    }

    #[test]
    fn unfilled_items_are_detected() {
        assert!(LineItem::new("tea", 1, 0).is_filled());
        assert!(!LineItem::new("  ", 1, 100).is_filled());
        assert!(!LineItem::new("tea", 0, 100).is_filled());
    }

    #[test]
    fn pos_request_uses_backend_key() {
        let items = [LineItem::new("water", 1, 120)];
        let body = serde_json::to_value(PosPayRequest {
            items: &items,
            pos_reference_number: "POS-77",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "items": [{ "name": "water", "pcs": 1, "price": 120 }],
                "POS_reference_number": "POS-77"
            })
        );
    }

    #[test]
    fn classify_known_statuses() {
        assert_eq!(TransactionStatus::classify(Some("paying")), TransactionStatus::InProgress);
        assert_eq!(TransactionStatus::classify(Some("user cancelled")), TransactionStatus::Failed);
        assert_eq!(TransactionStatus::classify(Some("completed")), TransactionStatus::Completed);
        assert_eq!(TransactionStatus::classify(None), TransactionStatus::Unknown);
    }

    #[test]
    fn details_tolerate_string_amounts_and_missing_blocks() {
        let details: TransactionDetails = serde_json::from_value(json!({
            "info": { "status": "processing", "pay_amount": "500", "change": 20.0 },
            "detail": [{ "denomination": 100, "pcs": 5, "status": "in" }]
        }))
        .unwrap();
        assert_eq!(details.info.pay_amount, Some(500));
        assert_eq!(details.info.change, Some(20));
        assert_eq!(details.info.classify(), TransactionStatus::InProgress);
        assert!(details.pay.is_empty());
        assert_eq!(details.detail[0].pcs, Some(5));

        let empty: TransactionDetails = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.info.classify(), TransactionStatus::Unknown);
    }
}
