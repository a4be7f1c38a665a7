//! Zap backend port.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::{TransactionRequest, ZapRequest};
use crate::error::Result;

/// Swap-and-deposit / withdraw-and-swap aggregator.
///
/// Backends are interchangeable; the router picks the first one whose
/// supported set contains the vault.
#[async_trait]
pub trait ZapBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Vaults this backend can zap into and out of.
    async fn supported_vault_addresses(&self) -> Result<Vec<Address>>;

    /// Build a zap into `request.vault` from `request.token`.
    async fn zap_in(&self, request: &ZapRequest) -> Result<TransactionRequest>;

    /// Build a zap out of `request.vault` into `request.token`.
    async fn zap_out(&self, request: &ZapRequest) -> Result<TransactionRequest>;

    /// Contract that spends `token` on a zap in.
    async fn zap_in_spender(&self, vault: Address, token: Address) -> Result<Address>;

    /// Contract that spends vault shares on a zap out.
    async fn zap_out_spender(&self, vault: Address, token: Address) -> Result<Address>;
}
