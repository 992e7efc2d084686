//! Checkout coordinator.

use std::sync::Arc;
use std::time::Instant;

use catalog::PromoService;
use common::{Amount, BookingId, UserId};
use membership::{MembershipService, Transaction, WalletAccount};
use payment::{Payment, PaymentService};
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::state::CheckoutStatus;
use crate::steps;

/// Request to pay for a booking from the wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub booking_id: BookingId,
    /// Undiscounted price of the booking.
    pub price: Amount,
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// Result of a checkout whose wallet debit went through.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub booking_id: BookingId,
    pub status: CheckoutStatus,
    pub price: Amount,
    pub discount: Amount,
    /// Amount debited from the wallet.
    pub charged: Amount,
    pub promo_code: Option<String>,
    pub wallet: WalletAccount,
    pub transaction: Transaction,
    /// Present when the payment record was written.
    pub payment: Option<Payment>,
    /// Why the checkout is unreconciled.
    pub reason: Option<String>,
}

/// Runs the wallet checkout choreography.
pub struct CheckoutCoordinator {
    membership: Arc<MembershipService>,
    payments: Arc<PaymentService>,
    promos: Arc<PromoService>,
}

impl CheckoutCoordinator {
    pub fn new(
        membership: Arc<MembershipService>,
        payments: Arc<PaymentService>,
        promos: Arc<PromoService>,
    ) -> Self {
        Self {
            membership,
            payments,
            promos,
        }
    }

    /// Debits the wallet for a booking, then pays the booking.
    ///
    /// Returns an error only when the checkout stopped before or at the
    /// debit. Once the wallet is debited a receipt is always returned; its
    /// status tells whether the booking ended up paid.
    #[tracing::instrument(skip(self, req), fields(booking_id = %req.booking_id))]
    pub async fn checkout(&self, user_id: UserId, req: CheckoutRequest) -> Result<CheckoutReceipt> {
        let started = Instant::now();
        if !req.price.is_positive() {
            return Err(CheckoutError::InvalidPrice(req.price.value()));
        }

        // 1. Apply promo
        let promo_code = req
            .promo_code
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let charged = match promo_code.as_deref() {
            Some(code) => {
                tracing::info!(step = steps::STEP_APPLY_PROMO, code, "checkout step started");
                let promo = self.promos.check_promo(code).await?;
                let charged = promo.apply_to(req.price);
                if charged.is_zero() {
                    return Err(CheckoutError::NothingToPay {
                        code: promo.code,
                        price: req.price,
                    });
                }
                charged
            }
            None => req.price,
        };
        let discount = req.price.saturating_sub(charged);

        // 2. Debit wallet
        tracing::info!(step = steps::STEP_DEBIT_WALLET, %charged, "checkout step started");
        let debit = self
            .membership
            .pay_with_wallet(
                user_id,
                charged,
                Some(format!("Payment for booking {}", req.booking_id)),
            )
            .await?;

        // 3. Record payment and mark booking paid
        tracing::info!(step = steps::STEP_PAY_BOOKING, "checkout step started");
        let (payment, reason) = match self
            .payments
            .pay_booking(
                req.booking_id,
                charged,
                Some(steps::WALLET_METHOD.to_string()),
            )
            .await
        {
            Ok(receipt) if receipt.booking_marked_paid => (Some(receipt.payment), None),
            Ok(receipt) => (
                Some(receipt.payment),
                Some(format!(
                    "{}: payment recorded but booking was not marked paid",
                    steps::STEP_PAY_BOOKING
                )),
            ),
            Err(e) => (
                None,
                Some(format!("{}: payment not recorded: {e}", steps::STEP_PAY_BOOKING)),
            ),
        };

        let status = if reason.is_none() {
            CheckoutStatus::Settled
        } else {
            CheckoutStatus::Unreconciled
        };

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        match status {
            CheckoutStatus::Settled => {
                metrics::counter!("checkout_settled_total").increment(1);
                tracing::info!(%user_id, %charged, "checkout settled");
            }
            CheckoutStatus::Unreconciled => {
                metrics::counter!("checkout_unreconciled_total").increment(1);
                tracing::warn!(
                    %user_id,
                    %charged,
                    transaction_id = %debit.transaction.id,
                    reason = reason.as_deref().unwrap_or_default(),
                    "checkout unreconciled: wallet debited without a paid booking"
                );
            }
        }

        Ok(CheckoutReceipt {
            booking_id: req.booking_id,
            status,
            price: req.price,
            discount,
            charged,
            promo_code,
            wallet: debit.account,
            transaction: debit.transaction,
            payment,
            reason,
        })
    }
}
