//! PostgreSQL integration tests for the payment store.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p payment --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use common::{Amount, BookingId};
use payment::{
    InMemoryBookingStatus, Payment, PaymentService, PaymentStatus, PaymentStore,
    PostgresPaymentStore,
};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();
            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            sqlx::raw_sql(include_str!(
                "../../../migrations/004_create_payments_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn get_test_store() -> PostgresPaymentStore {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();

    sqlx::query("TRUNCATE TABLE payments")
        .execute(&pool)
        .await
        .unwrap();

    PostgresPaymentStore::new(pool)
}

#[tokio::test]
async fn payments_are_listed_per_booking() {
    let store = get_test_store().await;
    let booking_id = BookingId::new();

    store
        .insert(Payment::success(booking_id, Amount::new(750_000), "WALLET"))
        .await
        .unwrap();
    store
        .insert(Payment::success(BookingId::new(), Amount::new(1), "TRANSFER"))
        .await
        .unwrap();

    let payments = store.list_for_booking(booking_id).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, Amount::new(750_000));
    assert_eq!(payments[0].method, "WALLET");
    assert_eq!(payments[0].status, PaymentStatus::Success);
}

#[tokio::test]
async fn amount_check_constraint() {
    let store = get_test_store().await;
    let result = store
        .insert(Payment::success(BookingId::new(), Amount::zero(), "WALLET"))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn service_over_postgres() {
    let store = get_test_store().await;
    let status = InMemoryBookingStatus::new();
    let service = PaymentService::new(Arc::new(store), Arc::new(status.clone()));
    let booking_id = BookingId::new();

    let receipt = service
        .pay_booking(booking_id, Amount::new(1_500_000), None)
        .await
        .unwrap();

    assert!(receipt.booking_marked_paid);
    assert_eq!(status.paid_bookings(), vec![booking_id]);
    assert_eq!(
        service
            .payments_for_booking(booking_id)
            .await
            .unwrap()
            .len(),
        1
    );
}
