mod common;

use common::fixtures;
use http::StatusCode;
use sawari_primitives::models::entities::enum_types::PaymentStatus;
use serial_test::serial;
use wiremock::MockServer;

#[tokio::test]
#[serial]
async fn ledger_view_is_visible_to_both_parties_only() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (passenger_id, driver_id, stranger_id, tx_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let stranger_id = fixtures::create_user(&mut conn, "mala", None);
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 50_000);
        let tx_id = fixtures::create_transaction(
            &mut conn,
            booking_id,
            passenger_id,
            driver_id,
            50_000,
            PaymentStatus::Captured,
        );
        (passenger_id, driver_id, stranger_id, tx_id)
    };

    for user in [passenger_id, driver_id] {
        let response = server
            .get(&format!("/api/transactions/{}", tx_id))
            .add_header(
                "Authorization",
                format!("Bearer {}", common::auth_token(&state, user)),
            )
            .await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["amount"], 50_000);
        assert_eq!(body["payment_status"], "captured");
        assert_eq!(body["payout_status"], "pending");
        assert_eq!(body["driver_net_amount"], 44_100);
    }

    let response = server
        .get(&format!("/api/transactions/{}", tx_id))
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, stranger_id)),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // No token at all.
    let response = server.get(&format!("/api/transactions/{}", tx_id)).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn fare_breakdown_endpoint_balances() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let user_id = {
        let mut conn = state.db.get().unwrap();
        fixtures::create_user(&mut conn, "asha", None)
    };

    let response = server
        .get("/api/fares/breakdown?fare=50000&commission_bps=1500&gst_bps=1800")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, user_id)),
        )
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["passengerPays"], 500.0);
    assert_eq!(body["platformCommission"], 75.0);
    assert_eq!(body["gstOnCommission"], 13.5);
    assert_eq!(body["platformKeeps"], 88.5);
    assert_eq!(body["driverReceives"], 411.5);
}
