use serde::{Deserialize, Serialize};

/// Denominations the withdrawal form offers.
pub const DENOMINATIONS: [u32; 9] = [1, 5, 10, 50, 100, 500, 1000, 5000, 10000];

/// One denomination to withdraw from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawItem {
    /// `true` for coins, `false` for banknotes.
    pub iscoin: bool,
    /// Number of pieces.
    pub pcs: u32,
    /// Face value of one piece.
    pub deno: u32,
}

impl WithdrawItem {
    pub fn banknote(deno: u32, pcs: u32) -> Self {
        WithdrawItem { iscoin: false, pcs, deno }
    }

    pub fn coin(deno: u32, pcs: u32) -> Self {
        WithdrawItem { iscoin: true, pcs, deno }
    }

    pub fn amount(&self) -> u64 {
        u64::from(self.pcs) * u64::from(self.deno)
    }
}

/// Total value of a withdrawal request.
pub fn withdraw_total(items: &[WithdrawItem]) -> u64 {
    items.iter().map(WithdrawItem::amount).fold(0, u64::saturating_add)
}

#[derive(Debug, Serialize)]
pub(crate) struct CashDetailRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefundRequest<'a> {
    pub amount: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct WithdrawRequest<'a> {
    pub withdraw: &'a [WithdrawItem],
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn withdraw_total_mixes_notes_and_coins() {
        let items = [WithdrawItem::banknote(1000, 3), WithdrawItem::coin(100, 4), WithdrawItem::coin(5, 0)];
        assert_eq!(withdraw_total(&items), 3400);
    }

    #[test]
    fn withdraw_total_saturates() {
        let items = [WithdrawItem::coin(u32::MAX, u32::MAX), WithdrawItem::coin(u32::MAX, u32::MAX)];
        assert_eq!(withdraw_total(&items), u64::MAX);
    }

    #[test]
    fn withdraw_body_shape() {
        let items = [WithdrawItem::coin(500, 2)];
        let body = serde_json::to_value(WithdrawRequest { withdraw: &items }).unwrap();
        assert_eq!(body, json!({ "withdraw": [{ "iscoin": true, "pcs": 2, "deno": 500 }] }));
    }
}
