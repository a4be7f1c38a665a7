//! Chain-side lens port.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::{CallOverrides, Position, VaultDynamic, VaultStatic};
use crate::error::Result;

/// Read adapter over the on-chain lens contracts for v2 vaults.
///
/// Address filters of `None` mean "every vault the lens knows".
#[async_trait]
pub trait VaultLens: Send + Sync {
    /// Static half of each vault record.
    async fn assets_static(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultStatic>>;

    /// Dynamic half of each vault record.
    async fn assets_dynamic(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultDynamic>>;

    /// Underlying token addresses of every vault.
    async fn tokens(&self, overrides: Option<&CallOverrides>) -> Result<Vec<Address>>;

    /// Positions held by `account`.
    ///
    /// # Errors
    ///
    /// May reject on large unfiltered reads; callers retry once with a filter.
    async fn positions_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Position>>;
}
