//! Member profile types.

use chrono::{DateTime, Utc};
use common::{Amount, UserId};
use serde::{Deserialize, Serialize};

use crate::wallet::WalletAccount;

/// Tier assigned to newly registered members.
pub const DEFAULT_TIER: &str = "Silver";

/// Account status assigned to newly registered members.
pub const DEFAULT_STATUS: &str = "Active";

/// Placeholder stored for contact fields the member has not filled in.
pub const UNSET_CONTACT: &str = "-";

/// A registered member.
///
/// The wallet balance lives on the member record; [`User::wallet`] exposes it
/// as a [`WalletAccount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub tier: String,
    pub points: i64,
    pub balance: Amount,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a freshly registered member with default tier, status and an
    /// empty wallet.
    pub fn register(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            full_name: full_name.into(),
            email: email.into(),
            phone: UNSET_CONTACT.to_string(),
            location: UNSET_CONTACT.to_string(),
            tier: DEFAULT_TIER.to_string(),
            points: 0,
            balance: Amount::zero(),
            status: DEFAULT_STATUS.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Returns the member's wallet view.
    pub fn wallet(&self) -> WalletAccount {
        WalletAccount {
            owner: self.id,
            balance: self.balance,
        }
    }
}

/// A member together with the stored password hash, used for login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

/// Partial profile update. Only fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.phone.is_none()
            && self.location.is_none()
    }

    /// Applies the present fields to `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref full_name) = self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(ref phone) = self.phone {
            user.phone = phone.clone();
        }
        if let Some(ref location) = self.location {
            user.location = location.clone();
        }
    }
}

/// Normalizes an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
