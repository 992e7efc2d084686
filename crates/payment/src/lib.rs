//! Payment records for bookings.
//!
//! A payment is always recorded as `SUCCESS`; afterwards the booking is asked
//! to move to `PAID` through a [`BookingStatusClient`]. The status update is
//! best-effort: its failure is logged and reported on the receipt, and the
//! payment record stays.

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod service;
pub mod status_client;
pub mod store;

pub use error::{PaymentError, Result, StatusUpdateError};
pub use memory::InMemoryPaymentStore;
pub use model::{PayBooking, Payment, PaymentReceipt, PaymentStatus};
pub use postgres::PostgresPaymentStore;
pub use service::PaymentService;
pub use status_client::{BookingStatusClient, HttpBookingStatusClient, InMemoryBookingStatus};
pub use store::PaymentStore;
