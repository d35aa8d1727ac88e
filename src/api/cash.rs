use http::Method;

use crate::models::cash::{CashDetailRequest, RefundRequest, WithdrawRequest};
use crate::{CashPointClient, Endpoint, Envelope, WithdrawItem};

/// Cash inventory and cash movement operations.
#[derive(Debug, Clone, Copy)]
pub struct CashApi<'a> {
    client: &'a CashPointClient,
}

impl<'a> CashApi<'a> {
    pub(crate) fn new(client: &'a CashPointClient) -> Self {
        Self { client }
    }

    /// Current banknote and coin inventory.
    pub async fn get_cash_info(&self) -> Envelope {
        self.client.send(Method::GET, Endpoint::CashInfo, None::<&()>).await
    }

    /// Detailed inventory of one storage unit, by name (e.g. a drum).
    pub async fn get_cash_detail_info(&self, name: &str) -> Envelope {
        self.client.send(Method::POST, Endpoint::CashDetailInfo, Some(&CashDetailRequest { name })).await
    }

    /// Puts the device into refill mode.
    pub async fn refill(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::Refill, None::<&()>).await
    }

    /// Leaves refill mode.
    pub async fn refill_end(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::RefillEnd, None::<&()>).await
    }

    /// Pays out `amount`, given as entered.
    pub async fn refund(&self, amount: &str) -> Envelope {
        self.client.send(Method::POST, Endpoint::Refund, Some(&RefundRequest { amount })).await
    }

    /// Dispenses specific denominations.
    pub async fn withdraw(&self, withdraw_items: &[WithdrawItem]) -> Envelope {
        let body = WithdrawRequest { withdraw: withdraw_items };
        self.client.send(Method::POST, Endpoint::Withdraw, Some(&body)).await
    }
}
