//! Account positions in vaults.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::vault::TokenAmount;

/// Allowance granted by `owner` to `spender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

/// An account's holding in one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub asset_address: Address,
    pub token_address: Address,
    pub type_id: String,
    pub balance: U256,
    pub underlying_token_balance: TokenAmount,
    pub asset_allowances: Vec<Allowance>,
    pub token_allowances: Vec<Allowance>,
}
