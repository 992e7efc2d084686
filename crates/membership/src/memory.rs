use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use tokio::sync::RwLock;

use crate::error::{MembershipError, Result};
use crate::store::MembershipStore;
use crate::user::{Credentials, ProfileUpdate, User};
use crate::wallet::{Transaction, TransactionKind, WalletAccount};

#[derive(Debug, Default)]
struct MembershipState {
    members: HashMap<UserId, Credentials>,
    /// Ledger in insertion order (oldest first).
    ledger: Vec<Transaction>,
}

/// In-memory membership store for tests and single-process deployments.
///
/// Members and the ledger sit behind one lock, so a balance change and its
/// ledger entry are applied under the same write guard.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    state: Arc<RwLock<MembershipState>>,
}

impl InMemoryMembershipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of ledger entries across all members.
    pub async fn transaction_count(&self) -> usize {
        self.state.read().await.ledger.len()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn insert_user(&self, user: User, password_hash: String) -> Result<User> {
        let mut state = self.state.write().await;

        if state.members.values().any(|c| c.user.email == user.email) {
            return Err(MembershipError::EmailTaken(user.email));
        }

        state.members.insert(
            user.id,
            Credentials {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.members.get(&id).map(|c| c.user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        let state = self.state.read().await;
        Ok(state
            .members
            .values()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn update_profile(&self, id: UserId, update: ProfileUpdate) -> Result<User> {
        let mut state = self.state.write().await;

        if let Some(ref email) = update.email
            && state
                .members
                .values()
                .any(|c| c.user.id != id && &c.user.email == email)
        {
            return Err(MembershipError::EmailTaken(email.clone()));
        }

        let record = state
            .members
            .get_mut(&id)
            .ok_or(MembershipError::UserNotFound(id))?;
        update.apply_to(&mut record.user);
        Ok(record.user.clone())
    }

    async fn apply_transaction(&self, transaction: Transaction) -> Result<WalletAccount> {
        let mut state = self.state.write().await;

        let owner = transaction.owner;
        let record = state
            .members
            .get_mut(&owner)
            .ok_or(MembershipError::UserNotFound(owner))?;

        let balance = record.user.balance;
        let new_balance = match transaction.kind {
            TransactionKind::TopUp => balance
                .checked_add(transaction.amount)
                .map_err(|_| MembershipError::AmountOverflow)?,
            TransactionKind::Payment => balance.checked_sub(transaction.amount).map_err(|_| {
                MembershipError::InsufficientFunds {
                    balance,
                    requested: transaction.amount,
                }
            })?,
        };

        record.user.balance = new_balance;
        let account = record.user.wallet();
        state.ledger.push(transaction);

        Ok(account)
    }

    async fn transactions_for(&self, owner: UserId) -> Result<Vec<Transaction>> {
        let state = self.state.read().await;
        Ok(state
            .ledger
            .iter()
            .rev()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect())
    }
}
