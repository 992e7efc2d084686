//! Wallet checkout for a booking.
//!
//! Checkout runs these steps in order:
//! 1. Apply a promo code (optional)
//! 2. Debit the member's wallet
//! 3. Record the payment and mark the booking paid
//!
//! Steps 2 and 3 live in different services and are not covered by one
//! transaction. If step 3 fails after the debit went through, the checkout
//! ends `UNRECONCILED`: the wallet stays debited and the outcome is reported,
//! logged and counted. Nothing refunds the wallet automatically.

pub mod coordinator;
pub mod error;
pub mod state;
pub mod steps;

pub use coordinator::{CheckoutCoordinator, CheckoutReceipt, CheckoutRequest};
pub use error::{CheckoutError, Result};
pub use state::CheckoutStatus;
