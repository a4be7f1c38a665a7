//! Per-account earnings views.

use std::sync::Arc;

use alloy_primitives::Address;
use tracing::debug;

use crate::domain::{VaultUserMetadata, VaultUserSummary};
use crate::error::Result;

use super::services::VaultServices;

pub struct EarningsSummarizer {
    services: Arc<VaultServices>,
}

impl EarningsSummarizer {
    pub fn new(services: Arc<VaultServices>) -> Self {
        Self { services }
    }

    /// Holdings, earnings, and yield of `account` across every vault.
    pub async fn summary_of(&self, account: Address) -> Result<VaultUserSummary> {
        let data = self.services.earnings.account_assets_data(account).await?;
        Ok(VaultUserSummary::from(&data))
    }

    /// Earned amount per asset, in earnings-data order.
    ///
    /// With `addresses` given, only assets in the filter are kept; an empty
    /// filter keeps nothing.
    pub async fn metadata_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
    ) -> Result<Vec<VaultUserMetadata>> {
        let data = self.services.earnings.account_assets_data(account).await?;
        let metadata: Vec<VaultUserMetadata> = data
            .earnings_asset_data
            .iter()
            .filter(|asset| addresses.map_or(true, |f| f.contains(&asset.asset_address)))
            .map(VaultUserMetadata::from)
            .collect();
        debug!(%account, count = metadata.len(), "Resolved earnings metadata");
        Ok(metadata)
    }
}
