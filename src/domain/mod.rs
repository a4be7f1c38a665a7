//! Chain-agnostic domain types for vault aggregation and routing.

pub mod chain;
pub mod earnings;
pub mod jar;
pub mod position;
pub mod token;
pub mod transaction;
pub mod vault;

use alloy_primitives::Address;

pub use chain::{ChainId, NATIVE_ASSET_ADDRESS};
pub use earnings::{EarningsAssetData, EarningsUserData, VaultUserMetadata, VaultUserSummary};
pub use jar::{JarRegistry, PICKLE_JARS};
pub use position::{Allowance, Position};
pub use token::{
    Balance, Erc20, Token, TokenAlias, TokenAllowance, TokenBalance, TokenDataSource,
    TokenLocalization, TokenMetadata, TokenSupported,
};
pub use transaction::{
    CallOverrides, Route, TransactionRequest, TransactionResponse, WriteOptions, ZapProtocol,
    ZapRequest,
};
pub use vault::{
    Apy, ApyMap, AssetHistoricEarnings, EarningsDayData, IconMap, RawVaultProperties,
    StrategyMetadata, TokenAmount, Vault, VaultDynamic, VaultInfo, VaultMetadata,
    VaultMetadataOverrides, VaultStatic, VaultStrategiesMetadata, FALLBACK_DISPLAY_NAME,
    VAULT_V2_TYPE,
};

/// Records identified by a single address.
pub trait Addressable {
    fn address(&self) -> Address;
}

/// Keep records whose address is in `addresses`, preserving their order.
///
/// `None` keeps everything; an empty filter keeps nothing.
pub fn filter_by_address<T: Addressable>(records: Vec<T>, addresses: Option<&[Address]>) -> Vec<T> {
    match addresses {
        None => records,
        Some(addresses) => records
            .into_iter()
            .filter(|record| addresses.contains(&record.address()))
            .collect(),
    }
}
