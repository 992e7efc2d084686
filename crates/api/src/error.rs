//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use booking::{AirlineError, BookingError};
use catalog::CatalogError;
use checkout::CheckoutError;
use membership::MembershipError;
use payment::PaymentError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Missing or invalid bearer token.
    Unauthorized(String),
    Membership(MembershipError),
    Catalog(CatalogError),
    Booking(BookingError),
    Payment(PaymentError),
    Checkout(CheckoutError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Membership(err) => membership_error_to_response(err),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Booking(err) => booking_error_to_response(err),
            ApiError::Payment(err) => payment_error_to_response(err),
            ApiError::Checkout(err) => checkout_error_to_response(err),
        };

        metrics::counter!("http_errors_total", "status" => status.as_u16().to_string())
            .increment(1);
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn membership_error_to_response(err: MembershipError) -> (StatusCode, String) {
    let status = match &err {
        MembershipError::EmailTaken(_) => StatusCode::CONFLICT,
        MembershipError::UserNotFound(_) => StatusCode::NOT_FOUND,
        MembershipError::InvalidCredentials | MembershipError::InvalidToken => {
            StatusCode::UNAUTHORIZED
        }
        MembershipError::InvalidInput(_)
        | MembershipError::InvalidAmount(_)
        | MembershipError::AmountOverflow => StatusCode::BAD_REQUEST,
        MembershipError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        MembershipError::PasswordHash(_)
        | MembershipError::Token(_)
        | MembershipError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    let status = match &err {
        CatalogError::HotelNotFound(_) | CatalogError::InvalidPromoCode(_) => {
            StatusCode::NOT_FOUND
        }
        CatalogError::PromoInactive(_) | CatalogError::PromoCodeTaken(_) => StatusCode::CONFLICT,
        CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn airline_status(err: &AirlineError) -> StatusCode {
    match err {
        AirlineError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        AirlineError::FlightNotFound(_) => StatusCode::NOT_FOUND,
        AirlineError::Transport(_)
        | AirlineError::HttpStatus { .. }
        | AirlineError::GraphQl(_)
        | AirlineError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
    }
}

fn booking_error_to_response(err: BookingError) -> (StatusCode, String) {
    let status = match &err {
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        BookingError::FlightLookup { source, .. } | BookingError::Airline(source) => {
            airline_status(source)
        }
        BookingError::FlightInactive { .. }
        | BookingError::NoSeatsAvailable(_)
        | BookingError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
        BookingError::SyncFailed { .. } => StatusCode::BAD_GATEWAY,
        BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, String) {
    let status = match &err {
        PaymentError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        PaymentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, String) {
    match err {
        CheckoutError::Promo(inner) => catalog_error_to_response(inner),
        CheckoutError::Wallet(inner) => membership_error_to_response(inner),
        CheckoutError::InvalidPrice(_) | CheckoutError::NothingToPay { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        ApiError::Membership(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Booking(err)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::Payment(err)
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}
