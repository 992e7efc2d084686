use async_trait::async_trait;
use common::UserId;

use crate::error::Result;
use crate::user::{Credentials, ProfileUpdate, User};
use crate::wallet::{Transaction, WalletAccount};

/// Persistence for members and their wallet ledger.
///
/// Implementations must make [`MembershipStore::apply_transaction`] atomic:
/// the balance change and the ledger append either both happen or neither
/// does, and concurrent debits against one wallet are serialized so that
/// the balance never goes negative.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Inserts a new member.
    ///
    /// Fails with `EmailTaken` if the email is already registered.
    async fn insert_user(&self, user: User, password_hash: String) -> Result<User>;

    /// Loads a member by ID.
    async fn find_user(&self, id: UserId) -> Result<Option<User>>;

    /// Loads a member and their password hash by (normalized) email.
    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>>;

    /// Applies a partial profile update and returns the updated member.
    ///
    /// Fails with `UserNotFound` or `EmailTaken`.
    async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User>;

    /// Applies a ledger entry to its owner's balance and appends it.
    ///
    /// `TOPUP` entries credit the balance; `PAYMENT` entries debit it and fail
    /// with `InsufficientFunds` (changing nothing) when the balance is lower
    /// than the amount.
    async fn apply_transaction(&self, transaction: Transaction) -> Result<WalletAccount>;

    /// Returns a member's ledger entries, newest first.
    async fn transactions_for(&self, owner: UserId) -> Result<Vec<Transaction>>;
}
