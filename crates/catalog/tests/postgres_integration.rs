//! PostgreSQL integration tests for the hotel and promo stores.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p catalog --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use catalog::{
    CatalogError, Hotel, HotelStore, NewHotel, PostgresHotelStore, PostgresPromoStore, Promo,
    PromoStatus, PromoStore,
};
use common::{Amount, HotelId};
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
                "../../../migrations/002_create_catalog_tables.sql"
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

async fn get_test_pool() -> PgPool {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();

    sqlx::query("TRUNCATE TABLE hotels, promos")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

#[tokio::test]
async fn hotel_insert_list_update() {
    let store = PostgresHotelStore::new(get_test_pool().await);

    let hotel = Hotel::from_request(NewHotel {
        name: "Hotel Indonesia Kempinski".to_string(),
        location: "Jakarta".to_string(),
        price_per_night: Amount::new(750_000),
        image_url: None,
    });
    store.insert_hotel(hotel.clone()).await.unwrap();

    let listed = store.list_hotels().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, hotel.id);
    assert_eq!(listed[0].price_per_night, Amount::new(750_000));
    assert_eq!(listed[0].rating, 4.5);

    let updated = store
        .update_image(hotel.id, "https://img.example.com/new.jpg")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.image_url, "https://img.example.com/new.jpg");

    assert!(
        store
            .update_image(HotelId::new(), "https://x")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn promo_lifecycle() {
    let store = PostgresPromoStore::new(get_test_pool().await);

    store
        .insert_promo(Promo::new("MERDEKA", Amount::new(170_845)))
        .await
        .unwrap();

    let duplicate = store
        .insert_promo(Promo::new("MERDEKA", Amount::new(1)))
        .await;
    assert!(matches!(duplicate, Err(CatalogError::PromoCodeTaken(_))));

    let found = store.find_by_code("MERDEKA").await.unwrap().unwrap();
    assert_eq!(found.status, PromoStatus::Active);

    let expired = store
        .set_status("MERDEKA", PromoStatus::Expired)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(expired.status, PromoStatus::Expired);

    assert!(
        store
            .list_promos(PromoStatus::Active)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        store
            .list_promos(PromoStatus::Expired)
            .await
            .unwrap()
            .len(),
        1
    );
}
