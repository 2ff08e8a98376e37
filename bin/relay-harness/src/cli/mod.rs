pub mod fetch_artifacts;
pub mod node;
pub mod verbosity;

use clap::{Parser, Subcommand};

use crate::cli::{
    fetch_artifacts::FetchArtifactsConfig, node::NodeConfig, verbosity::Verbosity,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity, overridden by RUST_LOG when set
    #[arg(long, global = true, value_enum, default_value_t = Verbosity::Info)]
    pub verbosity: Verbosity,

    /// Log as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the relay harness
    #[command(name = "node")]
    Node(NodeConfig),

    /// Download and unpack the execution and consensus client binaries
    #[command(name = "fetch-artifacts")]
    FetchArtifacts(FetchArtifactsConfig),
}

#[cfg(test)]
mod tests {
    use harness_node::config::SeedingPolicy;

    use super::*;

    #[test]
    fn node_command_defaults() {
        let cli = Cli::parse_from(["relay-harness", "node"]);

        let Commands::Node(config) = cli.command else {
            panic!("Expected node command");
        };
        assert_eq!(config.api_listen_addr, "127.0.0.1");
        assert_eq!(config.api_listen_port, 5555);
        assert_eq!(config.beacon_client_addr.as_str(), "http://localhost:8000/");
        assert!(!config.force);
        assert_eq!(
            config.harness_config().seeding_policy,
            SeedingPolicy::SignalGated
        );
    }

    #[test]
    fn force_flag_selects_immediate_seeding() {
        let cli = Cli::parse_from(["relay-harness", "node", "--force"]);

        let Commands::Node(config) = cli.command else {
            panic!("Expected node command");
        };
        assert_eq!(
            config.harness_config().seeding_policy,
            SeedingPolicy::Immediate
        );
    }

    #[test]
    fn fetch_artifacts_command_parses_output_dir() {
        let cli = Cli::parse_from([
            "relay-harness",
            "fetch-artifacts",
            "--output-dir",
            "/tmp/artifacts",
        ]);

        let Commands::FetchArtifacts(config) = cli.command else {
            panic!("Expected fetch-artifacts command");
        };
        assert_eq!(config.output_dir.to_str(), Some("/tmp/artifacts"));
    }

    #[test]
    fn verbosity_flag_is_global() {
        let cli = Cli::parse_from(["relay-harness", "node", "--verbosity", "debug"]);
        assert_eq!(cli.verbosity, Verbosity::Debug);
        assert_eq!(cli.verbosity.directive(), "debug");
    }
}
