//! Terminal front-end for OrcheNet device onboarding.
//!
//! Owns process bootstrap (configuration, tracing, wiring) and the
//! subcommands of the `orchenet` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod prompt;
pub mod render;

use bootstrap::{resolve_config, wire_onboarding, OnboardingSettings};
use commands::OnboardArgs;

#[derive(Debug, Parser)]
#[command(name = "orchenet", version, about = "Onboard network devices into OrcheNet")]
pub struct Cli {
    /// Configuration file (defaults to `<config dir>/orchenet/config.toml`)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a device and fetch its provisioning script
    Onboard(OnboardArgs),
    /// List supported vendors and device types
    Catalog,
    /// Print the tunnel name derived from a MAC address
    TunnelName {
        /// MAC address, `:` or `-` separated
        mac: String,
    },
}

/// Runs one subcommand. Tracing must already be initialized.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config)?;

    match cli.command {
        Commands::Onboard(args) => {
            let settings = OnboardingSettings::from_config(&config);
            info!(api_base_url = %settings.api_base_url, "resolved onboarding settings");
            let deps = wire_onboarding(&settings)?;
            commands::onboard::run(deps, &settings, args).await
        }
        Commands::Catalog => {
            print!("{}", commands::catalog::run(&config));
            Ok(())
        }
        Commands::TunnelName { mac } => {
            println!("{}", commands::tunnel::run(&mac)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_non_interactive_onboard() {
        let cli = Cli::parse_from([
            "orchenet",
            "-v",
            "onboard",
            "--vendor",
            "mikrotik",
            "--mac",
            "AA:BB:CC:11:22:33",
            "--non-interactive",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Onboard(args) => {
                assert_eq!(args.vendor.as_deref(), Some("mikrotik"));
                assert_eq!(args.mac.as_deref(), Some("AA:BB:CC:11:22:33"));
                assert!(args.non_interactive);
                assert!(args.output_dir.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_tunnel_name() {
        let cli = Cli::parse_from(["orchenet", "tunnel-name", "AA-BB-CC-11-22-33"]);
        assert!(matches!(cli.command, Commands::TunnelName { mac } if mac == "AA-BB-CC-11-22-33"));
    }
}
