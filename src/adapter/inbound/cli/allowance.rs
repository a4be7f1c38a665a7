//! Handler for the `allowance` command.

use crate::adapter::inbound::cli::command::AllowanceArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_services;
use crate::infrastructure::config::settings::Config;

/// Read and print one ERC-20 allowance.
pub async fn execute(args: &AllowanceArgs) -> Result<()> {
    let config = Config::load(&args.config.config)?;
    config.init_logging();

    let services = build_services(&config)?;
    let allowance = services
        .allowance
        .allowance(args.owner, args.token, args.spender)
        .await?;

    output::section("Allowance");
    output::record("allowance", &allowance)?;
    if allowance.amount.is_zero() {
        output::warning("No allowance granted");
    }
    Ok(())
}
