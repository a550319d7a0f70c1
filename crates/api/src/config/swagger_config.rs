use crate::handlers::{
    batch_payouts::__path_batch_payouts, create_order::__path_create_order,
    fare_breakdown::__path_fare_breakdown, get_transaction::__path_get_transaction,
    health::__path_health_check, payment_webhook::__path_payment_webhook,
    payout_webhook::__path_payout_webhook, retry_payout::__path_retry_payout,
    setup_driver::__path_setup_driver, trigger_payout::__path_trigger_payout,
    verify_payment::__path_verify_payment,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_order, verify_payment, fare_breakdown, get_transaction,
        setup_driver, trigger_payout, retry_payout, batch_payouts,
        payment_webhook, payout_webhook, health_check
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Orders", description = "Charge intents for bookings"),
        (name = "Payments", description = "Checkout verification"),
        (name = "Payouts", description = "Driver settlement dispatch"),
        (name = "Webhooks", description = "Gateway callbacks"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
