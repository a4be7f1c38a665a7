//! Per-account earnings aggregates.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Earned amount for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsAssetData {
    pub asset_address: Address,
    pub earned: U256,
}

/// Account aggregate reported by the earnings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsUserData {
    pub earnings: U256,
    pub holdings: U256,
    pub estimated_yearly_yield: U256,
    /// Ratio, not a base-unit amount.
    pub gross_apy: f64,
    pub earnings_asset_data: Vec<EarningsAssetData>,
}

/// Summary of an account across all vaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultUserSummary {
    pub holdings: U256,
    pub earnings: U256,
    pub estimated_yearly_yield: U256,
    pub gross_apy: f64,
}

impl From<&EarningsUserData> for VaultUserSummary {
    fn from(data: &EarningsUserData) -> Self {
        Self {
            holdings: data.holdings,
            earnings: data.earnings,
            estimated_yearly_yield: data.estimated_yearly_yield,
            gross_apy: data.gross_apy,
        }
    }
}

/// Earnings for one asset held by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultUserMetadata {
    pub asset_address: Address,
    pub earned: U256,
}

impl From<&EarningsAssetData> for VaultUserMetadata {
    fn from(data: &EarningsAssetData) -> Self {
        Self {
            asset_address: data.asset_address,
            earned: data.earned,
        }
    }
}
