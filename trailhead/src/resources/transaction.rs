//! Payment transactions
//!
//! Transactions are created by the payment flow, not from the dashboard;
//! the table lists them and lets an admin change their status.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};

wire_enum! {
    pub enum TransactionStatus {
        Pending => "PENDING",
        Success => "SUCCESS",
        Failed => "FAILED",
        Refunded => "REFUNDED",
    }
}

wire_enum! {
    pub enum PaymentMethod {
        VnPay => "VNPAY",
        Momo => "MOMO",
        BankTransfer => "BANK_TRANSFER",
        Cash => "CASH",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Gateway reference, e.g. `TX-20240301-0042`
    pub id: String,
    pub user_id: i64,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub booking_id: Option<i64>,
    /// Amount in VND
    pub amount: i64,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Success | TransactionStatus::Refunded
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,
    pub amount: i64,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Transaction> for TransactionPayload {
    fn from(tx: &Transaction) -> Self {
        Self {
            user_id: tx.user_id,
            booking_id: tx.booking_id,
            amount: tx.amount,
            status: tx.status,
            payment_method: tx.payment_method,
            description: tx.description.clone(),
        }
    }
}

impl Record for Transaction {
    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some((&self.id).into()),
            "userId" => Some(self.user_id.into()),
            "userEmail" => Some(self.user_email.as_ref().into()),
            "bookingId" => Some(self.booking_id.into()),
            "amount" => Some(self.amount.into()),
            "status" => Some(self.status.into()),
            "paymentMethod" => Some(self.payment_method.into()),
            "description" => Some(self.description.as_ref().into()),
            // RFC 3339 in UTC sorts chronologically as text
            "createdAt" => Some(FieldValue::owned(
                self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            )),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Transactions::PATH)
        .name("Transaction")
        .searchable(["id", "userEmail", "description"])
        .filterable(["status", "paymentMethod", "userId"])
        .sortable(["id", "amount", "status", "paymentMethod", "createdAt"])
        .page_size(20)
        .build()
});

/// `/transactions`
#[derive(Debug, Clone, Copy)]
pub struct Transactions;

impl Resource for Transactions {
    const PATH: &'static str = "transactions";
    type Record = Transaction;
    type Payload = TransactionPayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}
