//! Token records and balances.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::Addressable;

/// On-chain ERC-20 descriptor as returned by the token helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20 {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Where an enriched token record was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenDataSource {
    #[default]
    Vaults,
    Zapper,
    Portals,
}

/// Surfaces that can deposit with this token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenSupported {
    pub vaults: bool,
    pub zapper: bool,
    pub portals: bool,
}

/// Localized description of a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenLocalization {
    pub description: String,
}

/// Off-chain token metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenMetadata {
    pub address: Address,
    pub description: String,
    pub website: Option<String>,
    /// Keyed by language code.
    pub localization: BTreeMap<String, TokenLocalization>,
}

/// Name and symbol substitution for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAlias {
    pub address: Address,
    pub name: String,
    pub symbol: String,
}

/// Token view merged from chain descriptors, metadata, icons, and prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub icon: Option<String>,
    /// Price in USDC base units (6 decimals).
    pub price_usdc: U256,
    pub data_source: TokenDataSource,
    pub supported: TokenSupported,
    pub metadata: Option<TokenMetadata>,
}

impl Token {
    /// Bare token from a chain descriptor, before enrichment.
    #[must_use]
    pub fn from_erc20(erc20: Erc20) -> Self {
        Self {
            address: erc20.address,
            name: erc20.name,
            symbol: erc20.symbol,
            decimals: erc20.decimals,
            icon: None,
            price_usdc: U256::ZERO,
            data_source: TokenDataSource::default(),
            supported: TokenSupported::default(),
            metadata: None,
        }
    }
}

/// Raw balance of one token for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub address: Address,
    pub balance: U256,
    pub balance_usdc: U256,
    pub price_usdc: U256,
}

/// Balance joined with its enriched token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub address: Address,
    pub token: Token,
    pub balance: U256,
    pub balance_usdc: U256,
    pub price_usdc: U256,
}

impl Balance {
    #[must_use]
    pub fn new(raw: TokenBalance, token: Token) -> Self {
        Self {
            address: raw.address,
            token,
            balance: raw.balance,
            balance_usdc: raw.balance_usdc,
            price_usdc: raw.price_usdc,
        }
    }
}

/// Amount `spender` may move on behalf of `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAllowance {
    pub owner: Address,
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

impl Addressable for Token {
    fn address(&self) -> Address {
        self.address
    }
}
