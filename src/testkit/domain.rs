//! Builders for domain records used across tests.
//!
//! Factories fill every field with plausible defaults so tests only spell out
//! the fields they assert on.

use alloy_primitives::{Address, U256};
use chrono::NaiveDate;

use crate::domain::{
    AssetHistoricEarnings, EarningsAssetData, EarningsDayData, EarningsUserData, Erc20, Position,
    RawVaultProperties, TokenAmount, TokenBalance, VaultDynamic, VaultMetadata, VaultStatic,
    VAULT_V2_TYPE,
};

/// Address whose last byte is `n`, all others zero.
pub fn addr(n: u8) -> Address {
    Address::with_last_byte(n)
}

/// `n` distinct addresses starting at `first`.
pub fn addrs(first: u8, n: u8) -> Vec<Address> {
    (first..first.saturating_add(n)).map(addr).collect()
}

pub fn vault_static(address: Address, token: Address) -> VaultStatic {
    VaultStatic {
        address,
        type_id: VAULT_V2_TYPE.to_string(),
        token,
        name: format!("yVault {address}"),
        symbol: "yvTKN".to_string(),
        version: "0.4.3".to_string(),
        decimals: 18,
    }
}

pub fn vault_dynamic(address: Address, token: Address) -> VaultDynamic {
    VaultDynamic {
        address,
        type_id: VAULT_V2_TYPE.to_string(),
        token_id: token,
        underlying_token_balance: TokenAmount::new(U256::from(1_000u64), U256::from(2_000u64)),
        metadata: VaultMetadata {
            display_name: "Vault Metadata".to_string(),
            ..VaultMetadata::default()
        },
    }
}

/// Dynamic record whose lens-reported display name is blank.
pub fn vault_dynamic_unnamed(address: Address, token: Address) -> VaultDynamic {
    let mut dynamic = vault_dynamic(address, token);
    dynamic.metadata.display_name.clear();
    dynamic
}

pub fn erc20(address: Address, symbol: &str) -> Erc20 {
    Erc20 {
        address,
        name: format!("{symbol} Token"),
        symbol: symbol.to_string(),
        decimals: 18,
    }
}

pub fn token_balance(address: Address, balance: u64) -> TokenBalance {
    TokenBalance {
        address,
        balance: U256::from(balance),
        balance_usdc: U256::from(balance * 2),
        price_usdc: U256::from(2u64),
    }
}

pub fn position(asset: Address, token: Address) -> Position {
    Position {
        asset_address: asset,
        token_address: token,
        type_id: "DEPOSIT".to_string(),
        balance: U256::from(10u64),
        underlying_token_balance: TokenAmount::new(U256::from(11u64), U256::from(22u64)),
        asset_allowances: Vec::new(),
        token_allowances: Vec::new(),
    }
}

/// Earnings aggregate with one `(asset, earned)` entry per pair.
pub fn earnings_user_data(assets: &[(Address, u64)]) -> EarningsUserData {
    let total: u64 = assets.iter().map(|(_, earned)| earned).sum();
    EarningsUserData {
        earnings: U256::from(total),
        holdings: U256::from(total * 10),
        estimated_yearly_yield: U256::from(total * 2),
        gross_apy: 0.05,
        earnings_asset_data: assets
            .iter()
            .map(|(asset, earned)| EarningsAssetData {
                asset_address: *asset,
                earned: U256::from(*earned),
            })
            .collect(),
    }
}

/// One-day earnings series for `asset` holding `amount` at `decimals`.
pub fn historic_earnings(asset: Address, decimals: u8, amount: u64) -> AssetHistoricEarnings {
    AssetHistoricEarnings {
        asset_address: asset,
        decimals,
        day_data: vec![EarningsDayData {
            earnings: TokenAmount::new(U256::from(amount), U256::from(amount)),
            date: NaiveDate::from_ymd_opt(2021, 8, 1).unwrap_or_default(),
        }],
    }
}

pub fn raw_properties(last_report: U256) -> RawVaultProperties {
    RawVaultProperties {
        name: "yvDAI".to_string(),
        symbol: "yvDAI".to_string(),
        api_version: "0.4.3".to_string(),
        emergency_shutdown: false,
        management_fee: U256::from(200u64),
        performance_fee: U256::from(2_000u64),
        total_assets: U256::from(1_000_000u64),
        deposit_limit: U256::MAX,
        debt_ratio: U256::from(9_500u64),
        management: addr(0xa1),
        governance: addr(0xa2),
        guardian: addr(0xa3),
        rewards: addr(0xa4),
        last_report,
    }
}
