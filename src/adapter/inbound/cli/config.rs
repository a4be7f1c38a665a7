//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Effective Configuration");
    output::field("Config", path.display());
    output::field("Chain ID", config.chain_id);
    output::field("RPC", &config.rpc.url);
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Cache");
    output::field("Enabled", config.cache.enabled);
    output::field("TTL (s)", config.cache.ttl_secs);

    output::section("Partner");
    match &config.partner {
        Some(partner) => {
            if let Some(id) = partner.id {
                output::field("ID", id);
            }
            output::field("Tracker", partner.address);
            match &partner.vaults {
                Some(vaults) => output::field("Vaults", vaults.len()),
                None => output::field("Vaults", "all"),
            }
        }
        None => output::field("Partner", "disabled"),
    }

    output::section("Tokens");
    output::field("Overrides", config.token_overrides.len());

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");
    output::field("Chain ID", config.chain_id);

    if config.wallet.private_key.is_some() {
        output::success("Wallet credentials detected");
    } else {
        output::warning("Wallet credentials not configured (set WALLET_PRIVATE_KEY for approvals)");
    }

    Ok(())
}
