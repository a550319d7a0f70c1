mod common;

use chrono::{Duration, Utc};
use common::fixtures;
use diesel::prelude::*;
use http::StatusCode;
use sawari_core::services::payout_service::PayoutService;
use sawari_primitives::models::entities::enum_types::{
    PaymentStatus, PayoutStatus, SettlementStatus,
};
use sawari_primitives::schema::{driver_payout_accounts, payouts, transactions};
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_payout_create(mock_server: &MockServer, gateway_payout_id: &str, expect: Option<u64>) {
    let mut mock = Mock::given(method("POST"))
        .and(path("/v1/payouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": gateway_payout_id,
            "status": "processing",
            "mode": "IMPS",
            "utr": null
        })));
    if let Some(n) = expect {
        mock = mock.expect(n);
    }
    mock.mount(mock_server).await;
}

#[tokio::test]
#[serial]
async fn trigger_refuses_uncaptured_and_settled_transactions() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, pending_tx, settled_tx) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_a = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 20_000);
        let booking_b = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 20_000);
        let pending_tx = fixtures::create_transaction(
            &mut conn,
            booking_a,
            passenger_id,
            driver_id,
            20_000,
            PaymentStatus::Pending,
        );
        let settled_tx = fixtures::create_transaction(
            &mut conn,
            booking_b,
            passenger_id,
            driver_id,
            20_000,
            PaymentStatus::Captured,
        );
        fixtures::set_transaction_payout_status(&mut conn, settled_tx, SettlementStatus::Completed);
        (passenger_id, pending_tx, settled_tx)
    };

    let token = common::auth_token(&state, ops_id);

    let response = server
        .post("/api/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "transaction_id": pending_tx, "mode": "IMPS" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "transaction_id": settled_tx, "mode": "IMPS" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn trigger_dispatches_the_driver_net_share_once() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    // Two triggers, one gateway payout.
    mock_payout_create(&mock_server, "pout_live1", Some(1)).await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, tx_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 50_000);
        let tx_id = fixtures::create_transaction(
            &mut conn,
            booking_id,
            passenger_id,
            driver_id,
            50_000,
            PaymentStatus::Captured,
        );
        fixtures::create_driver_account(&mut conn, driver_id);
        (passenger_id, tx_id)
    };

    let token = common::auth_token(&state, ops_id);

    let first = server
        .post("/api/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "transaction_id": tx_id, "mode": "IMPS" }))
        .await;
    first.assert_status(StatusCode::OK);
    let first: serde_json::Value = first.json();
    assert_eq!(first["amount"], 44_100); // driver net of 500.00 at 10% + 18%
    assert_eq!(first["status"], "processing");

    // Re-trigger while in flight: same payout comes back, no new dispatch.
    let second = server
        .post("/api/payouts")
        .add_header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "transaction_id": tx_id, "mode": "IMPS" }))
        .await;
    second.assert_status(StatusCode::OK);
    let second: serde_json::Value = second.json();
    assert_eq!(first["id"], second["id"]);

    let mut conn = state.db.get().unwrap();
    let count: i64 = payouts::table
        .filter(payouts::transaction_id.eq(tx_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);

    let settlement: SettlementStatus = transactions::table
        .find(tx_id)
        .select(transactions::payout_status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(settlement, SettlementStatus::Processing);
}

#[tokio::test]
#[serial]
async fn trigger_provisions_the_payout_account_lazily() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cont_lazy1" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/fund_accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "fa_lazy1" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_payout_create(&mock_server, "pout_lazy1", None).await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, driver_id, tx_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let tx_id = fixtures::create_transaction(
            &mut conn,
            booking_id,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        (passenger_id, driver_id, tx_id)
    };

    let response = server
        .post("/api/payouts")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, ops_id)),
        )
        .json(&json!({ "transaction_id": tx_id, "mode": "UPI" }))
        .await;
    response.assert_status(StatusCode::OK);

    let mut conn = state.db.get().unwrap();
    let (contact_id, fund_account_id, verified): (String, String, bool) =
        driver_payout_accounts::table
            .find(driver_id)
            .select((
                driver_payout_accounts::gateway_contact_id,
                driver_payout_accounts::gateway_fund_account_id,
                driver_payout_accounts::verified,
            ))
            .first(&mut conn)
            .unwrap();
    assert_eq!(contact_id, "cont_lazy1");
    assert_eq!(fund_account_id, "fa_lazy1");
    assert!(verified);
}

#[tokio::test]
#[serial]
async fn gateway_refusal_marks_settlement_failed_without_a_row() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payouts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, tx_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let tx_id = fixtures::create_transaction(
            &mut conn,
            booking_id,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        fixtures::create_driver_account(&mut conn, driver_id);
        (passenger_id, tx_id)
    };

    let response = server
        .post("/api/payouts")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, ops_id)),
        )
        .json(&json!({ "transaction_id": tx_id, "mode": "IMPS" }))
        .await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let mut conn = state.db.get().unwrap();
    let count: i64 = payouts::table
        .filter(payouts::transaction_id.eq(tx_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 0);

    let settlement: SettlementStatus = transactions::table
        .find(tx_id)
        .select(transactions::payout_status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(settlement, SettlementStatus::Failed);
}

#[tokio::test]
#[serial]
async fn retry_guards_state_and_budget() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, live_payout, exhausted_payout) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_a = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let booking_b = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let tx_a = fixtures::create_transaction(
            &mut conn,
            booking_a,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        let tx_b = fixtures::create_transaction(
            &mut conn,
            booking_b,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        let (live_payout, _) = fixtures::create_payout(
            &mut conn,
            tx_a,
            driver_id,
            booking_a,
            26_460,
            PayoutStatus::Processing,
            0,
            3,
        );
        let (exhausted_payout, _) = fixtures::create_payout(
            &mut conn,
            tx_b,
            driver_id,
            booking_b,
            26_460,
            PayoutStatus::Failed,
            3,
            3,
        );
        (passenger_id, live_payout, exhausted_payout)
    };

    let token = common::auth_token(&state, ops_id);

    // Not failed.
    let response = server
        .post(&format!("/api/payouts/{}/retry", live_payout))
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Budget spent.
    let response = server
        .post(&format!("/api/payouts/{}/retry", exhausted_payout))
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn retry_carries_the_attempt_counter_forward() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    mock_payout_create(&mock_server, "pout_retry1", None).await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, failed_payout, tx_id) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_id = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let tx_id = fixtures::create_transaction(
            &mut conn,
            booking_id,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        fixtures::set_transaction_payout_status(&mut conn, tx_id, SettlementStatus::Failed);
        fixtures::create_driver_account(&mut conn, driver_id);
        let (failed_payout, _) = fixtures::create_payout(
            &mut conn,
            tx_id,
            driver_id,
            booking_id,
            26_460,
            PayoutStatus::Failed,
            0,
            3,
        );
        (passenger_id, failed_payout, tx_id)
    };

    let response = server
        .post(&format!("/api/payouts/{}/retry", failed_payout))
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, ops_id)),
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["retry_count"], 1);

    let mut conn = state.db.get().unwrap();

    // The original keeps the audit trail with its counter bumped.
    let original_count: i32 = payouts::table
        .find(failed_payout)
        .select(payouts::retry_count)
        .first(&mut conn)
        .unwrap();
    assert_eq!(original_count, 1);

    let rows: i64 = payouts::table
        .filter(payouts::transaction_id.eq(tx_id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(rows, 2);

    let settlement: SettlementStatus = transactions::table
        .find(tx_id)
        .select(transactions::payout_status)
        .first(&mut conn)
        .unwrap();
    assert_eq!(settlement, SettlementStatus::Processing);
}

#[tokio::test]
#[serial]
async fn batch_isolates_individual_failures() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    mock_payout_create(&mock_server, "pout_batch1", None).await;

    let state = common::create_test_app_state(&mock_server.uri());
    let server = common::create_test_server(state.clone());

    let (ops_id, captured_tx, pending_tx) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_a = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let booking_b = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let captured_tx = fixtures::create_transaction(
            &mut conn,
            booking_a,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        let pending_tx = fixtures::create_transaction(
            &mut conn,
            booking_b,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Pending,
        );
        fixtures::create_driver_account(&mut conn, driver_id);
        (passenger_id, captured_tx, pending_tx)
    };

    let response = server
        .post("/api/payouts/batch")
        .add_header(
            "Authorization",
            format!("Bearer {}", common::auth_token(&state, ops_id)),
        )
        .json(&json!({
            "transaction_ids": [captured_tx, pending_tx],
            "mode": "IMPS"
        }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["transaction_id"], captured_tx.to_string());
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[1]["transaction_id"], pending_tx.to_string());
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["message"].as_str().unwrap().contains("captured"));
}

#[tokio::test]
#[serial]
async fn sweep_retries_only_due_payouts() {
    if !common::db_available() {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    }

    let mock_server = MockServer::start().await;
    mock_payout_create(&mock_server, "pout_sweep1", Some(1)).await;

    let state = common::create_test_app_state(&mock_server.uri());

    let (due_tx, not_due_tx) = {
        let mut conn = state.db.get().unwrap();
        let passenger_id = fixtures::create_user(&mut conn, "asha", None);
        let driver_id = fixtures::create_user(&mut conn, "ravi", Some("ravi@upi"));
        let booking_a = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let booking_b = fixtures::create_booking(&mut conn, passenger_id, Some(driver_id), 30_000);
        let due_tx = fixtures::create_transaction(
            &mut conn,
            booking_a,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        let not_due_tx = fixtures::create_transaction(
            &mut conn,
            booking_b,
            passenger_id,
            driver_id,
            30_000,
            PaymentStatus::Captured,
        );
        fixtures::create_driver_account(&mut conn, driver_id);

        let (due_payout, _) = fixtures::create_payout(
            &mut conn,
            due_tx,
            driver_id,
            booking_a,
            26_460,
            PayoutStatus::Failed,
            0,
            3,
        );
        diesel::update(payouts::table.find(due_payout))
            .set(payouts::next_retry_at.eq(Utc::now() - Duration::minutes(5)))
            .execute(&mut conn)
            .unwrap();

        let (later_payout, _) = fixtures::create_payout(
            &mut conn,
            not_due_tx,
            driver_id,
            booking_b,
            26_460,
            PayoutStatus::Failed,
            0,
            3,
        );
        diesel::update(payouts::table.find(later_payout))
            .set(payouts::next_retry_at.eq(Utc::now() + Duration::hours(1)))
            .execute(&mut conn)
            .unwrap();

        (due_tx, not_due_tx)
    };

    let retried = PayoutService::sweep_due_retries(&state, 20).await.unwrap();
    assert_eq!(retried, 1);

    let mut conn = state.db.get().unwrap();
    let due_rows: i64 = payouts::table
        .filter(payouts::transaction_id.eq(due_tx))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(due_rows, 2);

    let later_rows: i64 = payouts::table
        .filter(payouts::transaction_id.eq(not_due_tx))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(later_rows, 1);
}
