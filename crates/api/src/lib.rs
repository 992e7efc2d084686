//! HTTP gateway for the travel platform.
//!
//! Composes the membership, catalog, booking, payment and checkout services
//! in one process behind REST endpoints, with bearer authentication,
//! structured logging (tracing) and Prometheus metrics.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking::{
    AirlineClient, AirlineError, BookingService, BookingStore, HttpAirlineClient,
    InMemoryBookingStore, PostgresBookingStore, UnconfiguredAirline,
};
use catalog::{
    HotelService, HotelStore, InMemoryHotelStore, InMemoryPromoStore, PostgresHotelStore,
    PostgresPromoStore, PromoService, PromoStore,
};
use checkout::CheckoutCoordinator;
use membership::{
    InMemoryMembershipStore, MembershipService, MembershipStore, PostgresMembershipStore,
    TokenIssuer,
};
use metrics_exporter_prometheus::PrometheusHandle;
use payment::{
    BookingStatusClient, HttpBookingStatusClient, InMemoryPaymentStore, PaymentService,
    PaymentStore, PostgresPaymentStore, StatusUpdateError,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use adapters::LocalBookingStatus;
use config::Config;
use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route(
            "/me",
            get(routes::members::me).patch(routes::members::update_me),
        )
        .route("/wallet", get(routes::members::wallet))
        .route("/wallet/top-up", post(routes::members::top_up))
        .route("/wallet/pay", post(routes::members::pay))
        .route("/wallet/transactions", get(routes::members::transactions))
        .route(
            "/hotels",
            get(routes::hotels::list).post(routes::hotels::create),
        )
        .route(
            "/hotels/{id}",
            get(routes::hotels::get).patch(routes::hotels::update),
        )
        .route(
            "/promos",
            get(routes::promos::list).post(routes::promos::create),
        )
        .route("/promos/{code}", get(routes::promos::check))
        .route("/promos/{code}/expire", post(routes::promos::expire))
        .route(
            "/bookings",
            post(routes::bookings::create).get(routes::bookings::list_mine),
        )
        .route("/bookings/{id}", get(routes::bookings::get))
        .route("/bookings/{id}/status", post(routes::bookings::update_status))
        .route("/bookings/{id}/payments", get(routes::bookings::payments))
        .route("/airline/flights", get(routes::airline::flights))
        .route("/airline/flights/{code}", get(routes::airline::flight))
        .route("/payments", post(routes::payments::pay))
        .route("/checkout", post(routes::checkout::checkout))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Stores backing each service.
struct Stores {
    members: Arc<dyn MembershipStore>,
    hotels: Arc<dyn HotelStore>,
    promos: Arc<dyn PromoStore>,
    bookings: Arc<dyn BookingStore>,
    payments: Arc<dyn PaymentStore>,
}

fn assemble(
    stores: Stores,
    config: &Config,
    airline: Arc<dyn AirlineClient>,
) -> Result<Arc<AppState>, StatusUpdateError> {
    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.token_ttl_hours),
    );
    let membership =
        Arc::new(MembershipService::new(stores.members, tokens).with_hash_cost(config.bcrypt_cost));
    let hotels = Arc::new(HotelService::new(stores.hotels));
    let promos = Arc::new(PromoService::new(stores.promos));
    let bookings = Arc::new(BookingService::new(stores.bookings, airline));
    let booking_status: Arc<dyn BookingStatusClient> = match config.booking_service() {
        Some((url, timeout)) => Arc::new(HttpBookingStatusClient::new(url, timeout)?),
        None => Arc::new(LocalBookingStatus::new(bookings.clone())),
    };
    let payments = Arc::new(PaymentService::new(stores.payments, booking_status));
    let checkout = CheckoutCoordinator::new(membership.clone(), payments.clone(), promos.clone());

    Ok(Arc::new(AppState {
        membership,
        hotels,
        promos,
        bookings,
        payments,
        checkout,
    }))
}

/// Creates application state over in-memory stores.
pub fn create_in_memory_state(
    config: &Config,
    airline: Arc<dyn AirlineClient>,
) -> Result<Arc<AppState>, StatusUpdateError> {
    let stores = Stores {
        members: Arc::new(InMemoryMembershipStore::new()),
        hotels: Arc::new(InMemoryHotelStore::new()),
        promos: Arc::new(InMemoryPromoStore::new()),
        bookings: Arc::new(InMemoryBookingStore::new()),
        payments: Arc::new(InMemoryPaymentStore::new()),
    };
    assemble(stores, config, airline)
}

/// Creates application state over PostgreSQL stores sharing one pool.
pub fn create_postgres_state(
    pool: PgPool,
    config: &Config,
    airline: Arc<dyn AirlineClient>,
) -> Result<Arc<AppState>, StatusUpdateError> {
    let stores = Stores {
        members: Arc::new(PostgresMembershipStore::new(pool.clone())),
        hotels: Arc::new(PostgresHotelStore::new(pool.clone())),
        promos: Arc::new(PostgresPromoStore::new(pool.clone())),
        bookings: Arc::new(PostgresBookingStore::new(pool.clone())),
        payments: Arc::new(PostgresPaymentStore::new(pool)),
    };
    assemble(stores, config, airline)
}

/// Builds the airline client; without both airline URLs every call fails
/// with "not configured".
pub fn airline_client(config: &Config) -> Result<Arc<dyn AirlineClient>, AirlineError> {
    match config.airline() {
        Some(airline) => Ok(Arc::new(HttpAirlineClient::new(airline)?)),
        None => Ok(Arc::new(UnconfiguredAirline)),
    }
}

/// Opens the connection pool for `url`.
pub async fn connect_database(config: &Config, url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(url)
        .await
}

/// Applies the SQL migrations shipped with the workspace.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
