use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    batch_payouts::batch_payouts, create_order::create_order, fare_breakdown::fare_breakdown,
    get_transaction::get_transaction, health::health_check, payment_webhook::payment_webhook,
    payout_webhook::payout_webhook, retry_payout::retry_payout, setup_driver::setup_driver,
    trigger_payout::trigger_payout, verify_payment::verify_payment,
};
use axum::{middleware, routing::get, routing::post, Router};
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::PrometheusMetricLayer;
use sawari_core::security::SecurityConfig;
use sawari_core::AppState;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    // rate limiting configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
            .unwrap(),
    );

    // public routes (no authentication)
    let public_router = create_public_routers(metric_handle);

    // protected routes (require JWT authentication)
    let protected_router = create_secured_routers(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        )
        .layer(metric_layer);

    // disable rate limiting in the test environment
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        router = router.layer(GovernorLayer {
            config: governor_conf,
        });
    }

    router.with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/orders", post(create_order))
        .route("/api/payments/verify", post(verify_payment))
        .route("/api/fares/breakdown", get(fare_breakdown))
        .route("/api/transactions/{transaction_id}", get(get_transaction))
        .route(
            "/api/drivers/{driver_id}/payout_account",
            post(setup_driver),
        )
        .route("/api/payouts", post(trigger_payout))
        .route("/api/payouts/{payout_id}/retry", post(retry_payout))
        .route("/api/payouts/batch", post(batch_payouts))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}

fn create_public_routers(metric_handle: PrometheusHandle) -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/webhooks/payments", post(payment_webhook))
        .route("/webhooks/payouts", post(payout_webhook))
        .route("/api/health", get(health_check))
        .route("/metrics", get(move || async move { metric_handle.render() }))
}
