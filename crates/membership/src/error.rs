//! Membership error types.

use common::{Amount, UserId};
use thiserror::Error;

/// Errors that can occur during membership and wallet operations.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// Another member already registered this email address.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// No member exists with the given ID.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The bearer token is malformed, expired or signed with another key.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Wallet amounts must be strictly positive.
    #[error("Invalid amount: {0} (must be greater than 0)")]
    InvalidAmount(i64),

    /// The wallet balance does not cover the requested debit.
    #[error("Insufficient wallet balance: have {balance}, need {requested}")]
    InsufficientFunds { balance: Amount, requested: Amount },

    /// Crediting would overflow the balance.
    #[error("Wallet balance overflow")]
    AmountOverflow,

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token encoding failed.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for membership operations.
pub type Result<T> = std::result::Result<T, MembershipError>;
