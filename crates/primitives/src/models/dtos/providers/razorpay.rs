use serde::{Deserialize, Serialize};

// Request payloads.

#[derive(Debug, Serialize)]
pub struct CreateOrderPayload<'a> {
    pub amount: i64,
    pub currency: &'a str,
    /// Deterministic per booking; gateway-side retries with the same receipt
    /// do not mint a second order.
    pub receipt: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateContactPayload<'a> {
    #[serde(rename = "type")]
    pub contact_type: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub contact: &'a str,
    pub reference_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateFundAccountPayload<'a> {
    pub contact_id: &'a str,
    pub account_type: &'a str,
    pub vpa: VpaDetails<'a>,
}

#[derive(Debug, Serialize)]
pub struct VpaDetails<'a> {
    pub address: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreatePayoutPayload<'a> {
    pub account_number: &'a str,
    pub fund_account_id: &'a str,
    pub amount: i64,
    pub currency: &'a str,
    pub mode: &'a str,
    pub purpose: &'a str,
    pub reference_id: &'a str,
    pub queue_if_low_balance: bool,
}

// Response / webhook entities.

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    pub order_id: Option<String>,
    pub amount: i64,
    pub status: String,
    pub method: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayContact {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayFundAccount {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPayout {
    pub id: String,
    pub status: String,
    pub mode: Option<String>,
    pub utr: Option<String>,
    pub failure_reason: Option<String>,
    pub status_details: Option<PayoutStatusDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutStatusDetails {
    pub reason: Option<String>,
    pub description: Option<String>,
}

// Webhook envelope: `{"event": "...", "payload": {"payment": {"entity":
// {...}}}}` with the entity keyed by its kind.

#[derive(Debug, Deserialize)]
pub struct RazorpayWebhook {
    pub event: String,
    pub payload: RazorpayWebhookPayload,
}

#[derive(Debug, Deserialize)]
pub struct RazorpayWebhookPayload {
    pub payment: Option<WebhookEntity<RazorpayPayment>>,
    pub payout: Option<WebhookEntity<RazorpayPayout>>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntity<T> {
    pub entity: T,
}
