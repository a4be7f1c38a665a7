//! Vault records: the static and dynamic halves reported on chain, the
//! merged view, and the metadata layered on top of them.

use std::collections::{BTreeMap, HashMap};

use alloy_primitives::{Address, U256};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Addressable;

/// Asset type tag reported by the lens for v2 vaults.
pub const VAULT_V2_TYPE: &str = "VAULT_V2";

/// Display name used when neither the lens nor an alias provides one.
pub const FALLBACK_DISPLAY_NAME: &str = "Vault";

/// Icon URLs keyed by the address they depict.
pub type IconMap = BTreeMap<Address, String>;

/// Amount of a token together with its value in USDC base units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub amount: U256,
    pub amount_usdc: U256,
}

impl TokenAmount {
    #[must_use]
    pub const fn new(amount: U256, amount_usdc: U256) -> Self {
        Self {
            amount,
            amount_usdc,
        }
    }
}

/// Structurally fixed half of a vault record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStatic {
    pub address: Address,
    pub type_id: String,
    /// Reference token the vault accepts and returns.
    pub token: Address,
    pub name: String,
    pub symbol: String,
    pub version: String,
    pub decimals: u8,
}

/// Frequently changing half of a vault record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDynamic {
    pub address: Address,
    pub type_id: String,
    pub token_id: Address,
    pub underlying_token_balance: TokenAmount,
    pub metadata: VaultMetadata,
}

/// Yield figures for a vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apy {
    pub type_id: String,
    pub gross_apr: Decimal,
    pub net_apy: Decimal,
}

/// Strategy descriptors for a single vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStrategiesMetadata {
    pub vault_address: Address,
    pub strategies_metadata: Vec<StrategyMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMetadata {
    pub address: Address,
    pub name: String,
    pub description: String,
    pub protocols: Vec<String>,
}

/// One day of earnings for an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsDayData {
    pub earnings: TokenAmount,
    pub date: NaiveDate,
}

/// Historic earnings series for one asset, in the series' own decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHistoricEarnings {
    pub asset_address: Address,
    pub decimals: u8,
    pub day_data: Vec<EarningsDayData>,
}

impl AssetHistoricEarnings {
    /// Day data with amounts expressed in `decimals` instead of the series' own.
    #[must_use]
    pub fn scaled_to(&self, decimals: u8) -> Vec<EarningsDayData> {
        self.day_data
            .iter()
            .map(|day| EarningsDayData {
                earnings: TokenAmount {
                    amount: rescale(day.earnings.amount, self.decimals, decimals),
                    amount_usdc: day.earnings.amount_usdc,
                },
                date: day.date,
            })
            .collect()
    }
}

/// Move an integer amount from one decimal precision to another.
///
/// Scaling down truncates; scaling up saturates at `U256::MAX`.
#[must_use]
pub fn rescale(amount: U256, from: u8, to: u8) -> U256 {
    let factor = |places: u8| U256::from(10u8).checked_pow(U256::from(places));
    match from.cmp(&to) {
        std::cmp::Ordering::Equal => amount,
        std::cmp::Ordering::Less => match factor(to - from) {
            Some(factor) => amount.saturating_mul(factor),
            None if amount.is_zero() => U256::ZERO,
            None => U256::MAX,
        },
        std::cmp::Ordering::Greater => factor(from - to).map_or(U256::ZERO, |f| amount / f),
    }
}

/// Off-chain metadata and display hints for a vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultMetadata {
    pub price_per_share: U256,
    pub deposit_limit: U256,
    pub total_assets: U256,
    pub total_supply: U256,
    pub emergency_shutdown: bool,
    pub migration_available: bool,
    pub latest_vault_address: Address,
    pub display_name: String,
    pub display_icon: IconMap,
    pub default_display_token: Address,
    pub hide_if_no_deposits: bool,
    pub deposits_disabled: bool,
    pub withdrawals_disabled: bool,
    pub allow_zap_in: bool,
    pub allow_zap_out: bool,
    pub migration_contract_address: Option<Address>,
    pub migration_target_vault: Option<Address>,
    pub vault_name_override: Option<String>,
    pub vault_symbol_override: Option<String>,
    pub apy: Option<Apy>,
    pub historic_earnings: Option<Vec<EarningsDayData>>,
    pub strategies: Option<VaultStrategiesMetadata>,
}

/// Per-vault corrections published by the metadata service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultMetadataOverrides {
    pub address: Address,
    pub comment: String,
    pub hide_always: bool,
    pub deposits_disabled: Option<bool>,
    pub withdrawals_disabled: Option<bool>,
    pub allow_zap_in: Option<bool>,
    pub allow_zap_out: Option<bool>,
    pub display_name: Option<String>,
    pub apy_override: Option<Decimal>,
    pub migration_contract_address: Option<Address>,
    pub migration_target_vault: Option<Address>,
    pub vault_name_override: Option<String>,
    pub vault_symbol_override: Option<String>,
}

impl VaultMetadataOverrides {
    /// Blank override record for `address`.
    #[must_use]
    pub fn for_vault(address: Address) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}

/// Vault view merged from static, dynamic, and off-chain sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    pub address: Address,
    pub type_id: String,
    pub token: Address,
    pub name: String,
    pub symbol: String,
    pub version: String,
    pub decimals: u8,
    pub underlying_token_balance: TokenAmount,
    pub metadata: VaultMetadata,
}

impl Vault {
    /// Merge a static record with its dynamic counterpart.
    ///
    /// Identity, token, and display fields come from the static half; balance
    /// and metadata from the dynamic half.
    #[must_use]
    pub fn merge(vault_static: VaultStatic, dynamic: VaultDynamic) -> Self {
        Self {
            address: vault_static.address,
            type_id: dynamic.type_id,
            token: vault_static.token,
            name: vault_static.name,
            symbol: vault_static.symbol,
            version: vault_static.version,
            decimals: vault_static.decimals,
            underlying_token_balance: dynamic.underlying_token_balance,
            metadata: dynamic.metadata,
        }
    }
}

/// Raw vault properties as read from chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVaultProperties {
    pub name: String,
    pub symbol: String,
    pub api_version: String,
    pub emergency_shutdown: bool,
    pub management_fee: U256,
    pub performance_fee: U256,
    pub total_assets: U256,
    pub deposit_limit: U256,
    pub debt_ratio: U256,
    pub management: Address,
    pub governance: Address,
    pub guardian: Address,
    pub rewards: Address,
    /// Unix seconds.
    pub last_report: U256,
}

/// Vault properties with the last report as a calendar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultInfo {
    pub name: String,
    pub symbol: String,
    pub api_version: String,
    pub emergency_shutdown: bool,
    pub management_fee: U256,
    pub performance_fee: U256,
    pub total_assets: U256,
    pub deposit_limit: U256,
    pub debt_ratio: U256,
    pub management: Address,
    pub governance: Address,
    pub guardian: Address,
    pub rewards: Address,
    pub last_report: DateTime<Utc>,
}

/// APY records keyed by vault address.
pub type ApyMap = HashMap<Address, Apy>;

impl Addressable for Vault {
    fn address(&self) -> Address {
        self.address
    }
}

impl Addressable for VaultDynamic {
    fn address(&self) -> Address {
        self.address
    }
}

impl Addressable for VaultStatic {
    fn address(&self) -> Address {
        self.address
    }
}
