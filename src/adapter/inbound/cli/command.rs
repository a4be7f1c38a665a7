//! Command-line interface definitions.

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};

/// Yield vault reads and approvals
#[derive(Parser, Debug)]
#[command(name = "yieldroute")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a vault's governance and accounting properties
    Info(InfoArgs),

    /// Read an ERC-20 allowance
    Allowance(AllowanceArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show the signing wallet address
    Wallet(ConfigPathArg),
}

/// Subcommands for `yieldroute config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that only need a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `yieldroute info`.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Vault contract address.
    pub vault: Address,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

/// Arguments for `yieldroute allowance`.
#[derive(Parser, Debug)]
pub struct AllowanceArgs {
    /// Token holder.
    pub owner: Address,
    /// ERC-20 token contract.
    pub token: Address,
    /// Contract allowed to spend.
    pub spender: Address,

    #[command(flatten)]
    pub config: ConfigPathArg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn info_parses_vault_and_config() {
        let cli = Cli::parse_from([
            "yieldroute",
            "info",
            "0xdA816459F1AB5631232FE5e97a05BBBb94970c95",
            "--config",
            "custom.toml",
            "--json",
        ]);

        assert!(cli.json);
        match cli.command {
            Commands::Info(args) => {
                assert_eq!(
                    args.vault,
                    alloy_primitives::address!("dA816459F1AB5631232FE5e97a05BBBb94970c95")
                );
                assert_eq!(args.config.config, PathBuf::from("custom.toml"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn malformed_address_is_rejected() {
        let result = Cli::try_parse_from(["yieldroute", "info", "0x1234"]);
        assert!(result.is_err());
    }
}
