use http::Method;

use crate::models::payment::{PayRequest, PaymentRequest, PosPayRequest, PosPaymentRequest, QueryRequest};
use crate::{CashPointClient, Endpoint, Envelope, LineItem};

/// Starts, queries and steers payment transactions.
///
/// Starting operations answer with `data.uuid`, the transaction reference
/// to pass to [`query`](Self::query). Cancel, stop and continue act on the
/// transaction currently running on the device.
#[derive(Debug, Clone, Copy)]
pub struct PaymentApi<'a> {
    client: &'a CashPointClient,
}

impl<'a> PaymentApi<'a> {
    pub(crate) fn new(client: &'a CashPointClient) -> Self {
        Self { client }
    }

    /// Starts an itemized payment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use cashpoint_client::{CashPointClient, LineItem};
    /// # async fn example(client: &CashPointClient) {
    /// let items = [LineItem::new("coffee", 2, 350)];
    /// let envelope = client.payments().pay(&items).await;
    /// if let Some(uuid) = envelope.uuid() {
    ///     println!("transaction {uuid} started");
    /// }
    /// # }
    /// ```
    pub async fn pay(&self, items: &[LineItem]) -> Envelope {
        self.client.send(Method::POST, Endpoint::Pay, Some(&PayRequest { items })).await
    }

    /// Starts a payment for a fixed amount, given as entered (`"500"`).
    pub async fn payment(&self, amount: &str) -> Envelope {
        self.client.send(Method::POST, Endpoint::Payment, Some(&PaymentRequest { amount })).await
    }

    /// Itemized payment tied to an external POS order.
    pub async fn pos_pay(&self, items: &[LineItem], pos_reference_number: &str) -> Envelope {
        let body = PosPayRequest { items, pos_reference_number };
        self.client.send(Method::POST, Endpoint::PosPay, Some(&body)).await
    }

    /// Fixed-amount payment tied to an external POS order.
    pub async fn pos_payment(&self, amount: &str, pos_reference_number: &str) -> Envelope {
        let body = PosPaymentRequest { amount, pos_reference_number };
        self.client.send(Method::POST, Endpoint::PosPayment, Some(&body)).await
    }

    /// Queries a transaction by its reference. The payload can be read with
    /// [`Envelope::data_as`] into [`TransactionDetails`](crate::TransactionDetails).
    pub async fn query(&self, transaction_id: &str) -> Envelope {
        self.client.send(Method::POST, Endpoint::Query, Some(&QueryRequest { uuid: transaction_id })).await
    }

    /// Cancels the running payment and returns the inserted cash.
    pub async fn cancel(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::Cancel, None::<&()>).await
    }

    /// Completes the running transaction with what has been inserted so far.
    pub async fn payment_stop(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::PaymentStop, None::<&()>).await
    }

    /// Resumes a paused transaction.
    pub async fn payment_continue(&self) -> Envelope {
        self.client.send(Method::POST, Endpoint::PaymentContinue, None::<&()>).await
    }
}
