//! Handler for the `info` command.

use crate::adapter::inbound::cli::command::InfoArgs;
use crate::adapter::inbound::cli::output;
use crate::application::VaultInterface;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_services;
use crate::infrastructure::config::settings::Config;

/// Read and print the properties of one vault.
pub async fn execute(args: &InfoArgs) -> Result<()> {
    let config = Config::load(&args.config.config)?;
    config.init_logging();

    let vaults = VaultInterface::new(build_services(&config)?);
    let info = vaults.get_info(args.vault).await?;

    output::section("Vault");
    output::field("Address", args.vault);
    output::record("vault_info", &info)?;
    if info.emergency_shutdown {
        output::warning("Vault is in emergency shutdown");
    }
    Ok(())
}
