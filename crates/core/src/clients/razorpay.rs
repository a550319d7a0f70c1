use reqwest::{Client, Url};
use sawari_primitives::error::ApiError;
use sawari_primitives::models::dtos::providers::razorpay::{
    CreateContactPayload, CreateFundAccountPayload, CreateOrderPayload, CreatePayoutPayload,
    RazorpayContact, RazorpayFundAccount, RazorpayOrder, RazorpayPayment, RazorpayPayout,
    VpaDetails,
};
use sawari_primitives::models::entities::enum_types::PayoutMode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Single payment-gateway client for both the charge side (Orders/Payments)
/// and the disbursement side (Contacts/Fund Accounts/Payouts). Constructed
/// once at process start and shared through `AppState`; tests point
/// `base_url` at a mock server.
#[derive(Clone)]
pub struct RazorpayClient {
    http: Client,
    base_url: Url,
    key_id: String,
    key_secret: SecretString,
}

impl RazorpayClient {
    pub fn new(
        http: Client,
        base_url: &str,
        key_id: String,
        key_secret: SecretString,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid Razorpay base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            key_id,
            key_secret,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        // base_url is validated at construction; joining a static path
        // cannot fail.
        self.base_url
            .join(path)
            .expect("endpoint path must be valid")
    }

    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<RazorpayOrder, ApiError> {
        let payload = CreateOrderPayload {
            amount,
            currency,
            receipt,
        };

        self.post("v1/orders", &payload, None).await
    }

    pub async fn fetch_payment(&self, payment_id: &str) -> Result<RazorpayPayment, ApiError> {
        let url = self.endpoint(&format!("v1/payments/{}", payment_id));

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| ApiError::Gateway(format!("Payment fetch failed: {}", e)))?;

        Self::read_response(resp).await
    }

    pub async fn create_contact(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        reference_id: &str,
    ) -> Result<RazorpayContact, ApiError> {
        let payload = CreateContactPayload {
            contact_type: "vendor",
            name,
            email,
            contact: phone,
            reference_id,
        };

        self.post("v1/contacts", &payload, None).await
    }

    pub async fn create_fund_account(
        &self,
        contact_id: &str,
        vpa_address: &str,
    ) -> Result<RazorpayFundAccount, ApiError> {
        let payload = CreateFundAccountPayload {
            contact_id,
            account_type: "vpa",
            vpa: VpaDetails {
                address: vpa_address,
            },
        };

        self.post("v1/fund_accounts", &payload, None).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_payout(
        &self,
        account_number: &str,
        fund_account_id: &str,
        amount: i64,
        currency: &str,
        mode: PayoutMode,
        reference_id: &str,
        idempotency_key: &str,
    ) -> Result<RazorpayPayout, ApiError> {
        let mode = mode.to_string();
        let payload = CreatePayoutPayload {
            account_number,
            fund_account_id,
            amount,
            currency,
            mode: &mode,
            purpose: "payout",
            reference_id,
            queue_if_low_balance: true,
        };

        self.post("v1/payouts", &payload, Some(idempotency_key)).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self
            .http
            .post(self.endpoint(path))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(payload);

        if let Some(key) = idempotency_key {
            req = req.header("X-Payout-Idempotency-Key", key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Gateway(format!("Gateway request failed: {}", e)))?;

        Self::read_response(resp).await
    }

    async fn read_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Gateway returned {}: {}", status, body);
            return Err(ApiError::Gateway(format!(
                "Gateway returned {}",
                status.as_u16()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|_| ApiError::Gateway("Invalid gateway response body".into()))
    }
}
