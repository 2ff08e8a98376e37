pub mod cli;
pub mod dev_relay;

use std::{env, process, sync::Arc, time::Duration};

use clap::Parser;
use harness_beacon_client::HttpBeaconClient;
use harness_executor::HarnessExecutor;
use harness_node::sequencer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Commands, fetch_artifacts::FetchArtifactsConfig, node::NodeConfig},
    dev_relay::{DevHousekeeping, DevRelayApi},
};

fn main() {
    let cli = Cli::parse();

    // Set the default log level based on the verbosity flag or RUST_LOG env var
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let env_filter = match rust_log.is_empty() {
        true => EnvFilter::builder().parse_lossy(cli.verbosity.directive()),
        false => EnvFilter::builder().parse_lossy(rust_log),
    };
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let executor = HarnessExecutor::new().expect("unable to create executor");
    let executor_clone = executor.clone();

    let task_handle = match cli.command {
        Commands::Node(config) => {
            executor_clone.spawn(async move { run_node(config, executor).await })
        }
        Commands::FetchArtifacts(config) => {
            executor_clone.spawn(async move { run_fetch_artifacts(config).await })
        }
    };

    let exit_code = executor_clone.runtime().block_on(async {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down...");
                0
            }
            result = task_handle => match result {
                Ok(Some(Ok(()))) => {
                    info!("Service exited, shutting down...");
                    0
                }
                Ok(Some(Err(err))) => {
                    error!("Fatal: {err:?}");
                    1
                }
                _ => 1,
            },
        }
    });

    executor_clone.shutdown_signal();
    executor_clone.shutdown_runtime();

    process::exit(exit_code);
}

/// Runs the relay harness wired to the dev relay stand-ins: waits for the
/// chain client, starts the in-memory infrastructure and the background
/// services, then parks until process shutdown.
async fn run_node(config: NodeConfig, executor: HarnessExecutor) -> anyhow::Result<()> {
    info!("starting up relay harness...");

    let beacon_client = Arc::new(HttpBeaconClient::new(
        config.beacon_client_addr.clone(),
        Duration::from_secs(config.request_timeout),
    )?);
    let housekeeping = Arc::new(DevHousekeeping);
    let api = Arc::new(DevRelayApi::new(
        config.api_listen_addr.clone(),
        config.api_listen_port,
    ));

    let harness = sequencer::start(
        config.harness_config(),
        &executor,
        beacon_client,
        housekeeping,
        api,
    )
    .await?;

    info!(
        block_validation_url = %harness.block_validation_url,
        registrations = harness.registration_store.count(),
        "Relay harness ready"
    );

    // The background services keep running until the process is interrupted.
    std::future::pending::<()>().await;
    Ok(())
}

async fn run_fetch_artifacts(config: FetchArtifactsConfig) -> anyhow::Result<()> {
    harness_artifacts::download_artifacts(&config.output_dir).await
}
