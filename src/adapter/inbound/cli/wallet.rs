//! Handler for the `wallet` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_connection;
use crate::infrastructure::config::settings::Config;

/// Show the wallet address derived from `WALLET_PRIVATE_KEY`.
pub fn execute_address(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let connection = build_connection(&config)?;
    let address = connection.signer()?.address();

    output::section("Wallet Address");
    output::field("Address", address);
    output::field("Chain ID", config.chain_id);
    Ok(())
}
