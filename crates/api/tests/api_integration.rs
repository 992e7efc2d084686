//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::config::Config;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use booking::{AirlineClient, FlightSchedule, InMemoryAirline, UnconfiguredAirline};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn test_config() -> Config {
    Config {
        jwt_secret: "integration-secret".to_string(),
        bcrypt_cost: 4,
        ..Default::default()
    }
}

fn setup_with(config: Config, airline: Arc<dyn AirlineClient>) -> Router {
    let state = api::create_in_memory_state(&config, airline).unwrap();
    api::create_app(state, get_metrics_handle())
}

fn setup_with_airline(airline: Arc<dyn AirlineClient>) -> Router {
    setup_with(test_config(), airline)
}

fn setup() -> Router {
    setup_with_airline(Arc::new(UnconfiguredAirline))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Registers a member and returns a bearer token for them.
async fn sign_up(app: &Router, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "full_name": "Rina Wijaya",
            "email": email,
            "password": "rahasia123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "rahasia123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn top_up(app: &Router, token: &str, amount: i64) {
    let (status, _) = send(
        app,
        "POST",
        "/wallet/top-up",
        Some(token),
        Some(json!({ "amount": amount })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn hotel_booking(app: &Router, token: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/bookings",
        Some(token),
        Some(json!({
            "kind": "HOTEL",
            "hotel_name": "Hotel Tugu Malang",
            "passenger_name": "Rina Wijaya",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;

    let (status, body) = send(&app, "GET", "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "rina@example.com");
    assert_eq!(body["balance"], 0);
    assert_eq!(body["tier"], "Silver");

    let (status, body) = send(
        &app,
        "PATCH",
        "/me",
        Some(&token),
        Some(json!({ "phone": "08123456789" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "08123456789");
}

#[tokio::test]
async fn test_malformed_bodies_are_json_bad_requests() {
    let app = setup();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "email": "a@b.c" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("missing field"));

    let (status, body) = send(
        &app,
        "POST",
        "/promos",
        None,
        Some(json!({ "code": "LIBURAN", "discount": "lots" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn test_duplicate_email_conflict() {
    let app = setup();
    sign_up(&app, "rina@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "full_name": "Someone Else",
            "email": "RINA@example.com",
            "password": "x",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("rina@example.com"));
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = setup();
    sign_up(&app, "rina@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "rina@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_routes_require_token() {
    let app = setup();

    for (method, uri) in [
        ("GET", "/me"),
        ("GET", "/wallet"),
        ("GET", "/bookings"),
        ("POST", "/checkout"),
    ] {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert!(body["error"].is_string());
    }

    let (status, _) = send(&app, "GET", "/wallet", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wallet_top_up_and_pay() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 2_000_000).await;

    let (status, body) = send(
        &app,
        "POST",
        "/wallet/pay",
        Some(&token),
        Some(json!({ "amount": 1_500_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"]["balance"], 500_000);
    assert_eq!(body["transaction"]["kind"], "PAYMENT");
    assert_eq!(body["transaction"]["description"], "Payment via Wallet");

    let (status, body) = send(&app, "GET", "/wallet/transactions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["PAYMENT", "TOPUP"]);
}

#[tokio::test]
async fn test_overdraw_is_unprocessable() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 1_000_000).await;

    let (status, _) = send(
        &app,
        "POST",
        "/wallet/pay",
        Some(&token),
        Some(json!({ "amount": 1_500_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, wallet) = send(&app, "GET", "/wallet", Some(&token), None).await;
    assert_eq!(wallet["balance"], 1_000_000);
}

#[tokio::test]
async fn test_non_positive_top_up_is_bad_request() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/wallet/top-up",
        Some(&token),
        Some(json!({ "amount": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hotel_catalog() {
    let app = setup();

    let (status, created) = send(
        &app,
        "POST",
        "/hotels",
        None,
        Some(json!({
            "name": "Hotel Tugu Malang",
            "location": "Malang",
            "price_per_night": 1_200_000,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["rating"], 4.5);
    let id = created["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/hotels/{id}"),
        None,
        Some(json!({ "image_url": "https://img.example.com/tugu.jpg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["image_url"], "https://img.example.com/tugu.jpg");

    let (status, list) = send(&app, "GET", "/hotels", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/hotels/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_promo_lifecycle() {
    let app = setup();

    let (status, _) = send(
        &app,
        "POST",
        "/promos",
        None,
        Some(json!({ "code": "LIBURAN", "discount": 100_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/promos/LIBURAN", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ACTIVE");

    let (status, _) = send(&app, "POST", "/promos/LIBURAN/expire", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/promos/LIBURAN", None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "GET", "/promos/NOPE", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, "GET", "/promos", None, None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_hotel_booking_and_status_update() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    let booking_id = hotel_booking(&app, &token).await;

    let (status, body) = send(&app, "GET", &format!("/bookings/{booking_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "BOOKED");
    assert_eq!(body["kind"], "HOTEL");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/status"),
        None,
        Some(json!({ "status": "PAID" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PAID");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/bookings/{booking_id}/status"),
        None,
        Some(json!({ "status": "BOOKED" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_flight_booking_without_airline_is_unavailable() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "flight_code": "GA-402", "passenger_name": "Rina Wijaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, "GET", "/airline/flights", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, bookings) = send(&app, "GET", "/bookings", Some(&token), None).await;
    assert!(bookings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_flight_booking_with_airline() {
    let airline = InMemoryAirline::new();
    airline.add_flight(FlightSchedule::active("GA-402", 12));
    airline.add_flight(FlightSchedule::active("QZ-7510", 0));
    let app = setup_with_airline(Arc::new(airline.clone()));
    let token = sign_up(&app, "rina@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "flight_code": "GA-402", "passenger_name": "Rina Wijaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "FLIGHT");
    assert_eq!(airline.synced_bookings().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "flight_code": "QZ-7510", "passenger_name": "Rina Wijaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "flight_code": "XX-1", "passenger_name": "Rina Wijaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, flight) = send(&app, "GET", "/airline/flights/GA-402", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flight["availableSeats"], 12);
}

#[tokio::test]
async fn test_sync_failure_rolls_back_booking() {
    let airline = InMemoryAirline::new();
    airline.add_flight(FlightSchedule::active("GA-402", 12));
    airline.set_fail_on_sync(true);
    let app = setup_with_airline(Arc::new(airline));
    let token = sign_up(&app, "rina@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/bookings",
        Some(&token),
        Some(json!({ "flight_code": "GA-402", "passenger_name": "Rina Wijaya" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, bookings) = send(&app, "GET", "/bookings", Some(&token), None).await;
    assert!(bookings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pay_booking_marks_paid() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    let booking_id = hotel_booking(&app, &token).await;

    let (status, receipt) = send(
        &app,
        "POST",
        "/payments",
        Some(&token),
        Some(json!({ "booking_id": booking_id, "amount": 1_200_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["booking_marked_paid"], true);
    assert_eq!(receipt["payment"]["method"], "TRANSFER");

    let (_, booking) = send(&app, "GET", &format!("/bookings/{booking_id}"), None, None).await;
    assert_eq!(booking["status"], "PAID");

    let (status, payments) = send(
        &app,
        "GET",
        &format!("/bookings/{booking_id}/payments"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_pay_unknown_booking_records_payment_unreconciled() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;

    let (status, receipt) = send(
        &app,
        "POST",
        "/payments",
        Some(&token),
        Some(json!({
            "booking_id": "7f0a4a8e-7d3c-4a4e-9f0e-3c6b3f1d2a11",
            "amount": 500_000,
            "method": "CARD",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["booking_marked_paid"], false);
}

#[tokio::test]
async fn test_unreachable_booking_service_leaves_booking_unpaid() {
    let config = Config {
        booking_service_url: Some("http://127.0.0.1:1".to_string()),
        booking_service_timeout_secs: 2,
        ..test_config()
    };
    let app = setup_with(config, Arc::new(UnconfiguredAirline));
    let token = sign_up(&app, "rina@example.com").await;
    let booking_id = hotel_booking(&app, &token).await;

    let (status, receipt) = send(
        &app,
        "POST",
        "/payments",
        Some(&token),
        Some(json!({ "booking_id": booking_id, "amount": 1_200_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["booking_marked_paid"], false);

    let (_, booking) = send(&app, "GET", &format!("/bookings/{booking_id}"), None, None).await;
    assert_eq!(booking["status"], "BOOKED");
}

#[tokio::test]
async fn test_checkout_settles_booking() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 2_000_000).await;
    let booking_id = hotel_booking(&app, &token).await;

    send(
        &app,
        "POST",
        "/promos",
        None,
        Some(json!({ "code": "HEMAT", "discount": 200_000 })),
    )
    .await;

    let (status, receipt) = send(
        &app,
        "POST",
        "/checkout",
        Some(&token),
        Some(json!({
            "booking_id": booking_id,
            "price": 1_500_000,
            "promo_code": "HEMAT",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["status"], "SETTLED");
    assert_eq!(receipt["charged"], 1_300_000);
    assert_eq!(receipt["wallet"]["balance"], 700_000);
    assert_eq!(receipt["payment"]["method"], "WALLET");

    let (_, booking) = send(&app, "GET", &format!("/bookings/{booking_id}"), None, None).await;
    assert_eq!(booking["status"], "PAID");
}

#[tokio::test]
async fn test_checkout_insufficient_funds_leaves_everything_unchanged() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 1_000_000).await;
    let booking_id = hotel_booking(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/checkout",
        Some(&token),
        Some(json!({ "booking_id": booking_id, "price": 1_500_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Insufficient"));

    let (_, wallet) = send(&app, "GET", "/wallet", Some(&token), None).await;
    assert_eq!(wallet["balance"], 1_000_000);

    let (_, booking) = send(&app, "GET", &format!("/bookings/{booking_id}"), None, None).await;
    assert_eq!(booking["status"], "BOOKED");

    let (_, payments) = send(
        &app,
        "GET",
        &format!("/bookings/{booking_id}/payments"),
        Some(&token),
        None,
    )
    .await;
    assert!(payments.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_with_expired_promo_is_conflict() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 2_000_000).await;
    let booking_id = hotel_booking(&app, &token).await;

    send(
        &app,
        "POST",
        "/promos",
        None,
        Some(json!({ "code": "LAMA", "discount": 50_000 })),
    )
    .await;
    send(&app, "POST", "/promos/LAMA/expire", None, None).await;

    let (status, _) = send(
        &app,
        "POST",
        "/checkout",
        Some(&token),
        Some(json!({
            "booking_id": booking_id,
            "price": 1_000_000,
            "promo_code": "LAMA",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, wallet) = send(&app, "GET", "/wallet", Some(&token), None).await;
    assert_eq!(wallet["balance"], 2_000_000);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    let token = sign_up(&app, "rina@example.com").await;
    top_up(&app, &token, 10_000).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("wallet_top_ups_total"));
}
