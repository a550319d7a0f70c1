use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

use crate::clients::RazorpayClient;
use eyre::Result;
pub use sawari_primitives::models::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub razorpay: RazorpayClient,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let razorpay = RazorpayClient::new(
            http.clone(),
            &config.razorpay_details.razorpay_api_url,
            config.razorpay_details.razorpay_key_id.clone(),
            config.razorpay_details.razorpay_key_secret.clone(),
        )?;

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            razorpay,
        }))
    }
}
