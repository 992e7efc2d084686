//! Shared application state.

use std::sync::Arc;

use booking::BookingService;
use catalog::{HotelService, PromoService};
use checkout::CheckoutCoordinator;
use membership::MembershipService;
use payment::PaymentService;

/// Services every handler can reach.
pub struct AppState {
    pub membership: Arc<MembershipService>,
    pub hotels: Arc<HotelService>,
    pub promos: Arc<PromoService>,
    pub bookings: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
    pub checkout: CheckoutCoordinator,
}
