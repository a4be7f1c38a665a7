//! Token ports: descriptors, balances, prices, and allowances.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::{
    CallOverrides, Erc20, Token, TokenAllowance, TokenBalance, TransactionResponse,
};
use crate::error::Result;

/// Batched ERC-20 reads.
#[async_trait]
pub trait TokenHelper: Send + Sync {
    /// On-chain descriptors for `addresses`.
    async fn tokens(
        &self,
        addresses: &[Address],
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Erc20>>;

    /// Balances of `account` for exactly `addresses`.
    async fn token_balances(
        &self,
        account: Address,
        addresses: &[Address],
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<TokenBalance>>;
}

/// Stable-currency price feed.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Price of one whole `token` in USDC base units.
    async fn price_usdc(&self, token: Address, overrides: Option<&CallOverrides>) -> Result<U256>;
}

/// ERC-20 allowance reads and approvals.
///
/// # Errors
///
/// Methods return [`Result`] for blockchain interaction failures.
#[async_trait]
pub trait AllowanceService: Send + Sync {
    /// Current allowance of `spender` over `owner`'s `token`.
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
    ) -> Result<TokenAllowance>;

    /// Submit an approval of `amount` for `spender`.
    async fn approve(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
        amount: U256,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse>;
}

/// Post-merge hook that corrects enriched token records for one environment.
pub trait TokenMetadataHook: Send + Sync {
    fn fill(&self, token: &mut Token);
}
