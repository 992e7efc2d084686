//! Checkout step names, used in logs and failure reasons.

pub const STEP_APPLY_PROMO: &str = "apply_promo";

pub const STEP_DEBIT_WALLET: &str = "debit_wallet";

pub const STEP_PAY_BOOKING: &str = "pay_booking";

/// Payment method recorded for wallet checkouts.
pub const WALLET_METHOD: &str = "WALLET";
