//! Off-chain metadata ports: vault overrides, icons and aliases, APY,
//! strategies, and earnings.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::{
    ApyMap, AssetHistoricEarnings, EarningsUserData, IconMap, TokenAlias, TokenMetadata,
    VaultMetadataOverrides, VaultStrategiesMetadata,
};
use crate::error::Result;

/// Published metadata for vaults and tokens.
#[async_trait]
pub trait MetaService: Send + Sync {
    /// Override records for every vault that has one.
    async fn vault_overrides(&self) -> Result<Vec<VaultMetadataOverrides>>;

    /// Description, website, and localization for `addresses`.
    async fn token_metadata(&self, addresses: &[Address]) -> Result<Vec<TokenMetadata>>;
}

/// Icon and alias lookups.
#[async_trait]
pub trait AssetService: Send + Sync {
    /// Icon map holding at most the entry for `address`.
    async fn icon(&self, address: Address) -> Result<IconMap>;

    /// Icon map for every address in `addresses` that has one.
    async fn icons(&self, addresses: &[Address]) -> Result<IconMap>;

    /// Name and symbol substitution for `address`, if any.
    async fn alias(&self, address: Address) -> Result<Option<TokenAlias>>;
}

/// APY figures.
#[async_trait]
pub trait VisionService: Send + Sync {
    async fn apy(&self, addresses: &[Address]) -> Result<ApyMap>;
}

/// Strategy descriptors.
#[async_trait]
pub trait StrategiesService: Send + Sync {
    async fn vaults_strategies_metadata(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<VaultStrategiesMetadata>>;
}

/// Earnings aggregates.
#[async_trait]
pub trait EarningsService: Send + Sync {
    /// Aggregate and per-asset earnings for `account`.
    async fn account_assets_data(&self, account: Address) -> Result<EarningsUserData>;

    /// Historic earnings series for `addresses`.
    async fn assets_historic_earnings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<AssetHistoricEarnings>>;
}
