//! Account positions with a single filtered retry.

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::domain::{CallOverrides, Position};
use crate::error::Result;

use super::assets::AssetAggregator;
use super::services::VaultServices;

/// Resolves an account's vault positions.
///
/// Unfiltered lens reads can reject on large vault sets. A rejected read is
/// retried exactly once, with an explicit filter.
pub struct PositionResolver {
    services: Arc<VaultServices>,
    assets: Arc<AssetAggregator>,
}

impl PositionResolver {
    pub fn new(services: Arc<VaultServices>, assets: Arc<AssetAggregator>) -> Self {
        Self { services, assets }
    }

    /// Positions held by `account`, optionally limited to `addresses`.
    ///
    /// On a first rejection the call is repeated once: with the same filter
    /// if one was given, otherwise filtered to every static vault address.
    /// The second attempt's outcome is returned as-is.
    pub async fn positions_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Position>> {
        let lens = &self.services.lens;
        let error = match lens.positions_of(account, addresses, overrides).await {
            Ok(positions) => return Ok(positions),
            Err(e) => e,
        };
        warn!(
            %account,
            error = %error,
            filtered = addresses.is_some(),
            "Position read failed, retrying once"
        );

        match addresses {
            Some(addresses) => lens.positions_of(account, Some(addresses), overrides).await,
            None => {
                let all: Vec<Address> = self
                    .assets
                    .get_static(None, None)
                    .await?
                    .into_iter()
                    .map(|v| v.address)
                    .collect();
                debug!(%account, vaults = all.len(), "Retrying with every static vault");
                lens.positions_of(account, Some(&all), overrides).await
            }
        }
    }
}
