//! Transaction submission and partner wrapping ports.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::{TransactionRequest, TransactionResponse, WriteOptions};
use crate::error::Result;

/// Builds calls against a vault contract.
pub trait VaultContract: Send + Sync {
    /// Deposit `amount` of the reference token into `vault` for `account`.
    fn deposit(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest>;

    /// Burn `amount` of `vault` shares, returning the reference token to `account`.
    fn withdraw(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest>;
}

/// Signer-backed transaction submission.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Fill in gas and pricing fields the caller left empty.
    async fn populate_transaction(&self, request: TransactionRequest) -> Result<TransactionRequest>;

    /// Sign and submit. Returns once the transaction is accepted by the node.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TransactionResponse>;
}

/// Partner contract that wraps direct deposits for attribution.
#[async_trait]
pub trait PartnerService: Send + Sync {
    /// Identifier forwarded to zap backends.
    fn partner_id(&self) -> Address;

    /// Partner tracker contract, the spender for wrapped deposits.
    fn address(&self) -> Address;

    /// Whether the partner wraps deposits into `vault`.
    async fn is_allowed(&self, vault: Address) -> Result<bool>;

    /// Build a wrapped deposit of `amount` into `vault`, sent by `account`.
    async fn populate_deposit_transaction(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionRequest>;
}
