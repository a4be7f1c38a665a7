//! `yieldroute` command-line interface.

pub mod allowance;
pub mod command;
pub mod config;
pub mod info;
pub mod output;
pub mod wallet;

use command::{Cli, Commands, ConfigCommand};

use crate::error::Result;

/// Run the parsed command.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Info(args) => info::execute(&args).await,
        Commands::Allowance(args) => allowance::execute(&args).await,
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
        Commands::Wallet(args) => wallet::execute_address(&args.config),
    }
}
