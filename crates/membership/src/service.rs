//! Membership service providing registration, login and wallet operations.

use std::sync::Arc;

use common::{Amount, UserId};
use serde::{Deserialize, Serialize};

use crate::auth::{self, BCRYPT_COST, TokenIssuer};
use crate::error::{MembershipError, Result};
use crate::store::MembershipStore;
use crate::user::{ProfileUpdate, User, normalize_email};
use crate::wallet::{DEFAULT_PAYMENT_DESCRIPTION, Transaction, WalletAccount, WalletReceipt};

/// Registration request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Successful login: a bearer token and the member it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Service for members and their wallets.
pub struct MembershipService {
    store: Arc<dyn MembershipStore>,
    tokens: TokenIssuer,
    hash_cost: u32,
}

impl MembershipService {
    /// Creates a new membership service.
    pub fn new(store: Arc<dyn MembershipStore>, tokens: TokenIssuer) -> Self {
        Self {
            store,
            tokens,
            hash_cost: BCRYPT_COST,
        }
    }

    /// Overrides the bcrypt cost (tests use the minimum to stay fast).
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Registers a new member with an empty wallet.
    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: RegisterUser) -> Result<User> {
        let full_name = req.full_name.trim();
        let email = normalize_email(&req.email);

        if full_name.is_empty() {
            return Err(MembershipError::InvalidInput(
                "full name is required".to_string(),
            ));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(MembershipError::InvalidInput(format!(
                "invalid email address: {}",
                req.email
            )));
        }
        if req.password.is_empty() {
            return Err(MembershipError::InvalidInput(
                "password is required".to_string(),
            ));
        }

        let password_hash = auth::hash_password(&req.password, self.hash_cost)?;
        let user = self
            .store
            .insert_user(User::register(full_name, email), password_hash)
            .await?;

        metrics::counter!("members_registered_total").increment(1);
        tracing::info!(user_id = %user.id, "member registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let Some(credentials) = self.store.find_credentials(&normalize_email(email)).await? else {
            tracing::debug!("login for unknown email");
            return Err(MembershipError::InvalidCredentials);
        };

        if !auth::verify_password(password, &credentials.password_hash)? {
            tracing::debug!(user_id = %credentials.user.id, "login with wrong password");
            return Err(MembershipError::InvalidCredentials);
        }

        let token = self.tokens.issue(credentials.user.id)?;
        Ok(AuthPayload {
            token,
            user: credentials.user,
        })
    }

    /// Resolves a bearer token to the member it was issued to.
    pub fn verify_token(&self, token: &str) -> Result<UserId> {
        self.tokens.verify(token)
    }

    /// Loads the calling member.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self, user_id: UserId) -> Result<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or(MembershipError::UserNotFound(user_id))
    }

    /// Updates the calling member's profile.
    #[tracing::instrument(skip(self))]
    pub async fn update_profile(&self, user_id: UserId, mut update: ProfileUpdate) -> Result<User> {
        if let Some(ref email) = update.email {
            let email = normalize_email(email);
            if email.is_empty() || !email.contains('@') {
                return Err(MembershipError::InvalidInput(format!(
                    "invalid email address: {email}"
                )));
            }
            update.email = Some(email);
        }
        update.full_name = update.full_name.map(|n| n.trim().to_string());
        if update.full_name.as_deref().is_some_and(str::is_empty) {
            return Err(MembershipError::InvalidInput(
                "full name cannot be blank".to_string(),
            ));
        }

        if update.is_empty() {
            return self.me(user_id).await;
        }
        self.store.update_profile(user_id, update).await
    }

    /// Returns the calling member's wallet.
    pub async fn wallet(&self, user_id: UserId) -> Result<WalletAccount> {
        Ok(self.me(user_id).await?.wallet())
    }

    /// Credits the wallet and records a `TOPUP` transaction.
    #[tracing::instrument(skip(self))]
    pub async fn top_up(&self, user_id: UserId, amount: Amount) -> Result<WalletReceipt> {
        ensure_positive(amount)?;

        let transaction = Transaction::top_up(user_id, amount);
        let account = self.store.apply_transaction(transaction.clone()).await?;

        metrics::counter!("wallet_top_ups_total").increment(1);
        tracing::info!(%user_id, %amount, balance = %account.balance, "wallet topped up");
        Ok(WalletReceipt {
            account,
            transaction,
        })
    }

    /// Debits the wallet and records a `PAYMENT` transaction.
    ///
    /// Fails closed: when the balance does not cover `amount` nothing changes
    /// and no transaction is written.
    #[tracing::instrument(skip(self, description))]
    pub async fn pay_with_wallet(
        &self,
        user_id: UserId,
        amount: Amount,
        description: Option<String>,
    ) -> Result<WalletReceipt> {
        ensure_positive(amount)?;

        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_DESCRIPTION.to_string());
        let transaction = Transaction::payment(user_id, amount, description);

        match self.store.apply_transaction(transaction.clone()).await {
            Ok(account) => {
                metrics::counter!("wallet_debits_total").increment(1);
                tracing::info!(%user_id, %amount, balance = %account.balance, "wallet debited");
                Ok(WalletReceipt {
                    account,
                    transaction,
                })
            }
            Err(e) => {
                metrics::counter!("wallet_debits_rejected_total").increment(1);
                tracing::warn!(%user_id, %amount, error = %e, "wallet debit rejected");
                Err(e)
            }
        }
    }

    /// Returns the calling member's transactions, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn my_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>> {
        self.store.transactions_for(user_id).await
    }
}

fn ensure_positive(amount: Amount) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(MembershipError::InvalidAmount(amount.value()))
    }
}
