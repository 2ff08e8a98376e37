use clap::Parser;
use harness_node::config::{
    DEFAULT_API_LISTEN_ADDR, DEFAULT_API_LISTEN_PORT, DEFAULT_BEACON_CLIENT_ADDR,
    DEFAULT_SECRET_KEY, HarnessConfig, SeedingPolicy,
};
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 2;

#[derive(Debug, Clone, Parser)]
pub struct NodeConfig {
    /// API listen address handed to the relay API service
    #[arg(long, default_value = DEFAULT_API_LISTEN_ADDR)]
    pub api_listen_addr: String,

    /// API listen port handed to the relay API service
    #[arg(long, default_value_t = DEFAULT_API_LISTEN_PORT)]
    pub api_listen_port: u16,

    /// Relay API secret key (hex, optional 0x prefix)
    #[arg(long, default_value = DEFAULT_SECRET_KEY)]
    pub api_secret: String,

    /// Chain client address
    #[arg(long, default_value = DEFAULT_BEACON_CLIENT_ADDR)]
    pub beacon_client_addr: Url,

    /// Per-request timeout against the chain client, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    pub request_timeout: u64,

    /// Force-seed placeholder registrations for every known validator at
    /// startup instead of waiting for the API readiness signal
    #[arg(long)]
    pub force: bool,
}

impl NodeConfig {
    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            api_listen_addr: self.api_listen_addr.clone(),
            api_listen_port: self.api_listen_port,
            api_secret_key: self.api_secret.clone(),
            seeding_policy: if self.force {
                SeedingPolicy::Immediate
            } else {
                SeedingPolicy::SignalGated
            },
        }
    }
}
