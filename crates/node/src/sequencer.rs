use std::{sync::Arc, time::Duration};

use alloy_primitives::B256;
use anyhow::{Context, anyhow};
use harness_beacon_client::BeaconApi;
use harness_cache::EphemeralCache;
use harness_chain::ChainDomainParameters;
use harness_executor::HarnessExecutor;
use harness_registry::{RegistrationRecord, RegistrationStore};
use tokio::time;
use tracing::{error, info};
use url::Url;

use crate::{
    block_validation::start_block_validation_stub,
    config::{HarnessConfig, SeedingPolicy, decode_secret_key},
    services::{HousekeepingService, RelayApiService},
};

pub const SYNC_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache key under which the number of known validators is published for the
/// datastore collaborator.
pub const KNOWN_VALIDATOR_COUNT_KEY: &str = "boost-relay/known-validator-count";

/// Everything the sequencer wired up, handed back to the embedding relay.
/// The background services keep running until process shutdown; there is no
/// drain handshake on them.
pub struct Harness {
    pub cache: Arc<EphemeralCache>,
    pub registration_store: Arc<RegistrationStore>,
    pub domain_parameters: ChainDomainParameters,
    pub block_validation_url: Url,
    pub secret_key: B256,
}

/// Bring the harness from "nothing running" to "fully wired and serving".
///
/// Ordering is fixed: wait for chain sync, derive the signature domain,
/// start infrastructure (cache, registration store, block validation stub),
/// start the relay services as supervised background tasks, then apply the
/// configured seeding policy. Failures before the services start are fatal
/// and returned to the caller; failures inside a started service are logged
/// and leave that service stopped while the rest keeps running.
pub async fn start<B, H, A>(
    config: HarnessConfig,
    executor: &HarnessExecutor,
    beacon_client: Arc<B>,
    housekeeping: Arc<H>,
    api: Arc<A>,
) -> anyhow::Result<Harness>
where
    B: BeaconApi + 'static,
    H: HousekeepingService,
    A: RelayApiService,
{
    // AwaitingSync: the api and housekeeping services would fail at startup
    // against an unsynced chain client, so this is a fatal precondition.
    wait_for_sync(beacon_client.as_ref()).await?;
    info!("Chain client synced");

    // ComputingDomain
    let genesis = beacon_client
        .get_genesis()
        .await
        .context("Failed to get genesis")?;
    let domain_parameters = ChainDomainParameters::derive(genesis.genesis_fork_version);
    info!(
        builder_domain = %domain_parameters.builder_domain,
        "Computed builder domain"
    );

    let secret_key = decode_secret_key(&config.api_secret_key)?;

    // StartingInfra
    let cache = Arc::new(EphemeralCache::new());
    let registration_store = Arc::new(RegistrationStore::new());
    let block_validation_url = start_block_validation_stub(executor)?;

    // StartingServices: supervised but not restarted, a failed service stays
    // stopped while the process keeps running.
    info!("Starting housekeeping service...");
    executor.spawn({
        let housekeeping = housekeeping.clone();
        async move {
            if let Err(err) = housekeeping.start().await {
                error!("Housekeeping service failed: {err:?}");
            }
        }
    });

    info!(
        listen_addr = %config.api_listen_addr,
        listen_port = config.api_listen_port,
        "Starting API service..."
    );
    executor.spawn({
        let api = api.clone();
        async move {
            if let Err(err) = api.start_server().await {
                error!("API service failed: {err:?}");
            }
        }
    });

    match config.seeding_policy {
        SeedingPolicy::Immediate => {
            // Register every known validator up front so downstream duty
            // computation has data without waiting for real registrations.
            let known_validators = beacon_client
                .known_validators()
                .await
                .context("Failed to fetch known validators")?;
            for (index, public_key) in known_validators.iter().enumerate() {
                registration_store.save(RegistrationRecord::placeholder(index as u64, *public_key));
            }
            cache.set(
                KNOWN_VALIDATOR_COUNT_KEY,
                known_validators.len().to_string(),
            );
            info!(
                count = known_validators.len(),
                "Force-seeded validator registrations"
            );
        }
        SeedingPolicy::SignalGated => {
            let signal = api
                .take_validator_update_signal()
                .ok_or_else(|| anyhow!("validator update signal already consumed"))?;

            // Only needed once at startup; afterwards the relay's normal
            // registration workflow takes over.
            signal
                .await
                .context("API service dropped the validator update signal")?;
            info!("Forcing validator duty update at startup");
            housekeeping.update_duties_without_checks(0);
            api.update_duties_without_checks(0);
        }
    }

    Ok(Harness {
        cache,
        registration_store,
        domain_parameters,
        block_validation_url,
        secret_key,
    })
}

/// Poll the chain client's sync status every [`SYNC_POLL_INTERVAL`] until it
/// reports synced, giving up after [`SYNC_TIMEOUT`]. The deadline is not
/// retried past: a chain client that never syncs is a fatal misconfiguration.
async fn wait_for_sync<B: BeaconApi + ?Sized>(beacon_client: &B) -> anyhow::Result<()> {
    time::timeout(SYNC_TIMEOUT, async {
        loop {
            if let Ok(status) = beacon_client.best_sync_status().await
                && status.is_synced()
            {
                return;
            }
            time::sleep(SYNC_POLL_INTERVAL).await;
        }
    })
    .await
    .map_err(|_| anyhow!("Chain client failed to sync within {SYNC_TIMEOUT:?}"))
}
