pub mod http_client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use harness_chain::BlsPublicKey;
use reqwest::Url;

use crate::{
    http_client::ClientWithBaseUrl,
    types::{DataResponse, GenesisDetails, SyncStatus, ValidatorSummary},
};

/// The chain-client queries the harness needs during startup. The production
/// implementation is [`HttpBeaconClient`]; tests substitute their own.
#[async_trait]
pub trait BeaconApi: Send + Sync {
    /// Current sync status of the chain client. An error means the client is
    /// unreachable, which the caller treats the same as "not yet synced".
    async fn best_sync_status(&self) -> anyhow::Result<SyncStatus>;

    async fn get_genesis(&self) -> anyhow::Result<GenesisDetails>;

    /// Every validator identity the chain client currently knows about.
    async fn known_validators(&self) -> anyhow::Result<Vec<BlsPublicKey>>;
}

/// Beacon API client over HTTP, scoped to the endpoints the harness consumes.
pub struct HttpBeaconClient {
    http_client: ClientWithBaseUrl,
}

impl HttpBeaconClient {
    pub fn new(beacon_api_endpoint: Url, request_timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http_client: ClientWithBaseUrl::new(beacon_api_endpoint, request_timeout)?,
        })
    }
}

#[async_trait]
impl BeaconApi for HttpBeaconClient {
    async fn best_sync_status(&self) -> anyhow::Result<SyncStatus> {
        let response: DataResponse<SyncStatus> = self
            .http_client
            .get("eth/v1/node/syncing")?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data)
    }

    async fn get_genesis(&self) -> anyhow::Result<GenesisDetails> {
        let response: DataResponse<GenesisDetails> = self
            .http_client
            .get("eth/v1/beacon/genesis")?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data)
    }

    async fn known_validators(&self) -> anyhow::Result<Vec<BlsPublicKey>> {
        let response: DataResponse<Vec<ValidatorSummary>> = self
            .http_client
            .get("eth/v1/beacon/states/head/validators")?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response
            .data
            .into_iter()
            .map(|summary| summary.validator.pubkey)
            .collect())
    }
}
