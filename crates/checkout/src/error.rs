//! Checkout error types.

use catalog::CatalogError;
use common::Amount;
use membership::MembershipError;
use thiserror::Error;

/// Errors that stop a checkout before the wallet is debited.
///
/// Failures after the debit do not produce an error; they end the checkout
/// as [`CheckoutStatus::Unreconciled`](crate::CheckoutStatus::Unreconciled).
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid price: {0} (must be greater than 0)")]
    InvalidPrice(i64),

    /// The promo code could not be applied.
    #[error("Promo error: {0}")]
    Promo(#[from] CatalogError),

    /// The promo discount covers the whole price.
    #[error("Promo {code} covers the whole price {price}; nothing to pay")]
    NothingToPay { code: String, price: Amount },

    /// The wallet debit failed; nothing was changed.
    #[error("Wallet debit failed: {0}")]
    Wallet(#[from] MembershipError),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
