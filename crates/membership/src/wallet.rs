//! Wallet accounts and the append-only transaction ledger.

use chrono::{DateTime, Utc};
use common::{Amount, TransactionId, UserId};
use serde::{Deserialize, Serialize};

/// Description recorded for wallet top-ups.
pub const TOP_UP_DESCRIPTION: &str = "Wallet Top Up";

/// Description recorded for wallet payments when the caller gives none.
pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "Payment via Wallet";

/// A member's wallet. The balance is never negative at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub owner: UserId,
    pub balance: Amount,
}

/// Kind of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Balance credited by the member.
    #[serde(rename = "TOPUP")]
    TopUp,

    /// Balance debited to pay for something.
    #[serde(rename = "PAYMENT")]
    Payment,
}

impl TransactionKind {
    /// Returns the stored name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::TopUp => "TOPUP",
            TransactionKind::Payment => "PAYMENT",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOPUP" => Ok(TransactionKind::TopUp),
            "PAYMENT" => Ok(TransactionKind::Payment),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// An immutable ledger entry documenting one balance mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub owner: UserId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a top-up entry.
    pub fn top_up(owner: UserId, amount: Amount) -> Self {
        Self::new(owner, TransactionKind::TopUp, amount, TOP_UP_DESCRIPTION)
    }

    /// Creates a payment entry.
    pub fn payment(owner: UserId, amount: Amount, description: impl Into<String>) -> Self {
        Self::new(owner, TransactionKind::Payment, amount, description)
    }

    fn new(
        owner: UserId,
        kind: TransactionKind,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            owner,
            kind,
            amount,
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// The wallet state after a mutation together with the entry that recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletReceipt {
    pub account: WalletAccount,
    pub transaction: Transaction,
}
