//! Placeholder for collaborators without an endpoint.
//!
//! Binaries that only need chain reads wire this in for the off-chain
//! services; any call through it fails with an upstream error naming the
//! service.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::{
    ApyMap, AssetHistoricEarnings, CallOverrides, EarningsUserData, Erc20, IconMap, Position,
    TokenAlias, TokenBalance, TokenMetadata, VaultDynamic, VaultMetadataOverrides, VaultStatic,
    VaultStrategiesMetadata,
};
use crate::error::{Error, Result};
use crate::port::outbound::{
    AssetService, EarningsService, MetaService, PriceOracle, StrategiesService, TokenHelper,
    VaultLens, VisionService,
};

/// Fails every call with "no endpoint configured".
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
    service: &'static str,
}

impl Unconfigured {
    pub const fn new(service: &'static str) -> Self {
        Self { service }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(Error::upstream(self.service, "no endpoint configured"))
    }
}

#[async_trait]
impl VaultLens for Unconfigured {
    async fn assets_static(
        &self,
        _addresses: Option<&[Address]>,
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultStatic>> {
        self.fail()
    }

    async fn assets_dynamic(
        &self,
        _addresses: Option<&[Address]>,
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultDynamic>> {
        self.fail()
    }

    async fn tokens(&self, _overrides: Option<&CallOverrides>) -> Result<Vec<Address>> {
        self.fail()
    }

    async fn positions_of(
        &self,
        _account: Address,
        _addresses: Option<&[Address]>,
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Position>> {
        self.fail()
    }
}

#[async_trait]
impl MetaService for Unconfigured {
    async fn vault_overrides(&self) -> Result<Vec<VaultMetadataOverrides>> {
        self.fail()
    }

    async fn token_metadata(&self, _addresses: &[Address]) -> Result<Vec<TokenMetadata>> {
        self.fail()
    }
}

#[async_trait]
impl AssetService for Unconfigured {
    async fn icon(&self, _address: Address) -> Result<IconMap> {
        self.fail()
    }

    async fn icons(&self, _addresses: &[Address]) -> Result<IconMap> {
        self.fail()
    }

    async fn alias(&self, _address: Address) -> Result<Option<TokenAlias>> {
        self.fail()
    }
}

#[async_trait]
impl VisionService for Unconfigured {
    async fn apy(&self, _addresses: &[Address]) -> Result<ApyMap> {
        self.fail()
    }
}

#[async_trait]
impl StrategiesService for Unconfigured {
    async fn vaults_strategies_metadata(
        &self,
        _addresses: &[Address],
    ) -> Result<Vec<VaultStrategiesMetadata>> {
        self.fail()
    }
}

#[async_trait]
impl EarningsService for Unconfigured {
    async fn account_assets_data(&self, _account: Address) -> Result<EarningsUserData> {
        self.fail()
    }

    async fn assets_historic_earnings(
        &self,
        _addresses: &[Address],
    ) -> Result<Vec<AssetHistoricEarnings>> {
        self.fail()
    }
}

#[async_trait]
impl TokenHelper for Unconfigured {
    async fn tokens(
        &self,
        _addresses: &[Address],
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Erc20>> {
        self.fail()
    }

    async fn token_balances(
        &self,
        _account: Address,
        _addresses: &[Address],
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<TokenBalance>> {
        self.fail()
    }
}

#[async_trait]
impl PriceOracle for Unconfigured {
    async fn price_usdc(&self, _token: Address, _overrides: Option<&CallOverrides>) -> Result<U256> {
        self.fail()
    }
}
