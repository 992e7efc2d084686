//! Flight and hotel bookings.
//!
//! Flight bookings are validated against the airline's schedule service and
//! then synchronised with the airline's booking service. A booking whose
//! synchronisation fails is deleted again (compensating delete), so a
//! persisted flight booking always has a successful sync behind it.
//!
//! The seat check and the sync are separate calls; nothing reserves a seat
//! between them.

pub mod airline;
pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod service;
pub mod store;

pub use airline::{
    AirlineClient, AirlineConfig, AirlineError, FlightSchedule, HttpAirlineClient,
    InMemoryAirline, ScheduleFilter, SyncedBooking, UnconfiguredAirline,
};
pub use error::{BookingError, Result};
pub use memory::InMemoryBookingStore;
pub use model::{Booking, BookingKind, BookingStatus, NewBooking};
pub use postgres::PostgresBookingStore;
pub use service::BookingService;
pub use store::BookingStore;
