use sawari_core::services::payout_service::PayoutService;
use sawari_core::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::log::{debug, info};
use tracing::error;

/// Periodic retry sweep. The scheduling lives here in the binary; the core
/// operation it drives is the same idempotent `retry_payout` an operator
/// would hit, over a bounded batch of failed payouts whose backoff elapsed.
pub fn spawn_payout_sweep(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Starting payout retry sweep task");
        run_payout_sweep(state).await;
    });
}

async fn run_payout_sweep(state: Arc<AppState>) {
    let mut interval = interval(Duration::from_secs(state.config.payout.sweep_interval_secs));
    interval.tick().await;

    loop {
        interval.tick().await;

        match PayoutService::sweep_due_retries(&state, state.config.payout.sweep_batch_size).await
        {
            Ok(0) => debug!("No payouts due for retry"),
            Ok(n) => info!("Retried {} failed payouts", n),
            Err(e) => error!("Payout sweep failed: {}", e),
        }
    }
}
