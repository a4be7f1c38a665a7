//! Vault properties port.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::RawVaultProperties;
use crate::error::Result;

/// Batched read of a vault's governance and accounting properties.
#[async_trait]
pub trait PropertiesAggregator: Send + Sync {
    async fn get_properties(&self, vault: Address) -> Result<RawVaultProperties>;
}
