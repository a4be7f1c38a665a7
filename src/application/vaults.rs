//! Public vault interface bundling every use case for one chain.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use crate::domain::{
    Balance, CallOverrides, Position, Token, TokenAllowance, TransactionResponse, Vault,
    VaultDynamic, VaultInfo, VaultMetadataOverrides, VaultStatic, VaultUserMetadata,
    VaultUserSummary, WriteOptions,
};
use crate::error::Result;

use super::assets::AssetAggregator;
use super::earnings::EarningsSummarizer;
use super::info::InfoReader;
use super::positions::PositionResolver;
use super::router::TransactionRouter;
use super::services::VaultServices;
use super::tokens::TokenEnricher;

/// Entry point for vault reads and writes.
///
/// Cheap to share: every component holds the same `Arc<VaultServices>`.
pub struct VaultInterface {
    assets: Arc<AssetAggregator>,
    tokens: TokenEnricher,
    positions: PositionResolver,
    earnings: EarningsSummarizer,
    router: TransactionRouter,
    info: InfoReader,
}

impl VaultInterface {
    pub fn new(services: VaultServices) -> Self {
        let services = Arc::new(services);
        let assets = Arc::new(AssetAggregator::new(services.clone()));
        Self {
            tokens: TokenEnricher::new(services.clone()),
            positions: PositionResolver::new(services.clone(), assets.clone()),
            earnings: EarningsSummarizer::new(services.clone()),
            router: TransactionRouter::new(services.clone(), assets.clone()),
            info: InfoReader::new(services),
            assets,
        }
    }

    pub async fn get(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Vault>> {
        self.assets.get(addresses, overrides).await
    }

    pub async fn get_static(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultStatic>> {
        self.assets.get_static(addresses, overrides).await
    }

    pub async fn get_dynamic(
        &self,
        addresses: Option<&[Address]>,
        metadata_overrides: Option<&[VaultMetadataOverrides]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultDynamic>> {
        self.assets
            .get_dynamic(addresses, metadata_overrides, overrides)
            .await
    }

    pub async fn tokens(&self, overrides: Option<&CallOverrides>) -> Result<Vec<Token>> {
        self.tokens.tokens(overrides).await
    }

    pub async fn balances(
        &self,
        account: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Balance>> {
        self.tokens.balances(account, overrides).await
    }

    pub async fn positions_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Position>> {
        self.positions
            .positions_of(account, addresses, overrides)
            .await
    }

    pub async fn summary_of(&self, account: Address) -> Result<VaultUserSummary> {
        self.earnings.summary_of(account).await
    }

    pub async fn metadata_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
    ) -> Result<Vec<VaultUserMetadata>> {
        self.earnings.metadata_of(account, addresses).await
    }

    pub async fn deposit(
        &self,
        vault: Address,
        token: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionResponse> {
        self.router
            .deposit(vault, token, amount, account, options)
            .await
    }

    pub async fn withdraw(
        &self,
        vault: Address,
        token: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionResponse> {
        self.router
            .withdraw(vault, token, amount, account, options)
            .await
    }

    pub async fn get_deposit_allowance(
        &self,
        account: Address,
        vault: Address,
        token: Address,
    ) -> Result<TokenAllowance> {
        self.router
            .get_deposit_allowance(account, vault, token)
            .await
    }

    pub async fn get_withdraw_allowance(
        &self,
        account: Address,
        vault: Address,
        token: Address,
    ) -> Result<TokenAllowance> {
        self.router
            .get_withdraw_allowance(account, vault, token)
            .await
    }

    pub async fn approve_deposit(
        &self,
        account: Address,
        vault: Address,
        token: Address,
        amount: Option<U256>,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        self.router
            .approve_deposit(account, vault, token, amount, overrides)
            .await
    }

    pub async fn approve_withdraw(
        &self,
        account: Address,
        vault: Address,
        token: Address,
        amount: Option<U256>,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        self.router
            .approve_withdraw(account, vault, token, amount, overrides)
            .await
    }

    pub async fn get_info(&self, vault: Address) -> Result<VaultInfo> {
        self.info.get_info(vault).await
    }
}
