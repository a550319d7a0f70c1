mod common;

use common::fixtures;
use diesel::prelude::*;
use http::StatusCode;
use sawari_primitives::models::entities::enum_types::BookingPaymentStatus;
use sawari_primitives::schema::{bookings, transactions};
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[serial]
async fn create_order_opens_a_charge_intent() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "order_test123",
            "amount": 50_000,
            "currency": "INR",
            "receipt": "bk-x",
            "status": "created"
        })))
        .mount(&mock_server)
        .await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, booking_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 50_000);
        (passenger_id, booking_id)
    };

    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, passenger_id)),
        )
        .json(&json!({ "booking_id": booking_id }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["order_id"], "order_test123");
    assert_eq!(body["amount"], 50_000);
    assert_eq!(body["currency"], "INR");

    // The ledger row carries the full balanced split and the booking moved
    // to pending payment.
    let mut conn = state.db.get().unwrap();
    let (base, gst, platform, net): (i64, i64, i64, i64) = transactions::table
        .filter(transactions::booking_id.eq(booking_id))
        .select((
            transactions::base_commission_amount,
            transactions::gst_amount,
            transactions::platform_total,
            transactions::driver_net_amount,
        ))
        .first(&mut conn)
        .unwrap();
    assert_eq!(base, 5_000);
    assert_eq!(gst, 900);
    assert_eq!(platform, 5_900);
    assert_eq!(net, 44_100);

    let payment_status: BookingPaymentStatus = bookings::table
        .find(booking_id)
        .select(bookings::payment_status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(payment_status, BookingPaymentStatus::Pending);
}

#[tokio::test]
#[serial]
async fn create_order_is_idempotent_per_booking() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    // Exactly one gateway order may be minted across both submits.
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "order_once",
            "amount": 30_000,
            "currency": "INR",
            "receipt": "bk-x",
            "status": "created"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, booking_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        (passenger_id, booking_id)
    };

    let token = common::auth_token(&state, passenger_id);

    let first = server
        .post("/api/orders")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "booking_id": booking_id }))
        .await;
    first.assert_status(StatusCode::OK);
    let first: serde_json::Value = first.json();

    let second = server
        .post("/api/orders")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "booking_id": booking_id }))
        .await;
    second.assert_status(StatusCode::OK);
    let second: serde_json::Value = second.json();

    assert_eq!(first["order_id"], second["order_id"]);
    assert_eq!(first["transaction_id"], second["transaction_id"]);

    let mut conn = state.db.get().unwrap();
    let count: i64 = transactions::table
        .filter(transactions::booking_id.eq(booking_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[serial]
async fn create_order_rejects_foreign_and_paid_bookings() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, stranger_id, booking_id, paid_booking_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let stranger_id = fixtures::create_user(&mut conn, "mala", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 20_000);
        let paid_booking_id =
            fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 20_000);
        fixtures::mark_booking_paid(&mut conn, paid_booking_id);
        (passenger_id, stranger_id, booking_id, paid_booking_id)
    };

    // Not the booking's passenger.
    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, stranger_id)),
        )
        .json(&json!({ "booking_id": booking_id }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // Already paid.
    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, passenger_id)),
        )
        .json(&json!({ "booking_id": paid_booking_id }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Unknown booking.
    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, passenger_id)),
        )
        .json(&json!({ "booking_id": Uuid::new_v4() }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn create_order_requires_an_assigned_driver() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, booking_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, None, 20_000);
        (passenger_id, booking_id)
    };

    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, passenger_id)),
        )
        .json(&json!({ "booking_id": booking_id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let mut conn = state.db.get().unwrap();
    let count: i64 = transactions::table
        .filter(transactions::booking_id.eq(booking_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[serial]
async fn create_order_persists_nothing_when_the_gateway_refuses() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "description": "order create failed" }
        })))
        .mount(&mock_server)
        .await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, booking_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 20_000);
        (passenger_id, booking_id)
    };

    let response = server
        .post("/api/orders")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, passenger_id)),
        )
        .json(&json!({ "booking_id": booking_id }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);

    let mut conn = state.db.get().unwrap();
    let count: i64 = transactions::table
        .filter(transactions::booking_id.eq(booking_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 0);
}
