use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

/// Seam to the relay's housekeeping service. The harness starts it and, in
/// signal-gated seeding, forces a duty recomputation through it; everything
/// else the service does is its own business.
#[async_trait]
pub trait HousekeepingService: Send + Sync + 'static {
    /// Run the service until process shutdown. An error stops this service
    /// only; the rest of the harness keeps running.
    async fn start(self: Arc<Self>) -> anyhow::Result<()>;

    fn update_duties_without_checks(&self, slot: u64);
}

/// Seam to the relay's API service.
#[async_trait]
pub trait RelayApiService: Send + Sync + 'static {
    /// Serve the relay API until process shutdown.
    async fn start_server(self: Arc<Self>) -> anyhow::Result<()>;

    /// One-shot readiness signal, fired when the API layer has observed its
    /// first validator-duty update. Returns `None` once taken: the signal is
    /// consumed by exactly one waiter.
    fn take_validator_update_signal(&self) -> Option<oneshot::Receiver<()>>;

    fn update_duties_without_checks(&self, slot: u64);
}
