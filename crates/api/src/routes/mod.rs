//! HTTP handlers, one module per service.

pub mod airline;
pub mod auth;
pub mod bookings;
pub mod checkout;
pub mod health;
pub mod hotels;
pub mod members;
pub mod metrics;
pub mod payments;
pub mod promos;
