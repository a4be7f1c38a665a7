//! Transaction requests, submission results, and routing options.

use std::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unsigned transaction ready to be populated and sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub to: Address,
    pub from: Address,
    pub data: Bytes,
    pub value: U256,
    pub gas: Option<U256>,
    pub gas_price: Option<U256>,
}

impl TransactionRequest {
    /// Call `to` from `from` with `data` and no value attached.
    #[must_use]
    pub fn call(from: Address, to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            from,
            data: data.into(),
            ..Self::default()
        }
    }
}

/// Result of handing a transaction to the signer.
///
/// Returned once the transaction is submitted; confirmation is not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: B256,
    pub from: Address,
    pub to: Address,
}

/// Chain-read overrides forwarded untouched to collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallOverrides {
    pub block_number: Option<u64>,
    pub from: Option<Address>,
    pub gas_price: Option<U256>,
}

/// Caller options for deposit and withdraw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriteOptions {
    /// Maximum tolerated price deviation for a zap, as a fraction.
    pub slippage: Option<Decimal>,
    pub overrides: Option<CallOverrides>,
}

impl WriteOptions {
    #[must_use]
    pub fn with_slippage(slippage: Decimal) -> Self {
        Self {
            slippage: Some(slippage),
            ..Self::default()
        }
    }
}

/// Zap protocol servicing a routed deposit or withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZapProtocol {
    Yearn,
    Pickle,
}

impl fmt::Display for ZapProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yearn => write!(f, "YEARN"),
            Self::Pickle => write!(f, "PICKLE"),
        }
    }
}

/// How a deposit or withdraw reaches the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Call the vault (or the partner wrapper) with the reference token.
    Direct,
    /// Swap through a zap backend first.
    Zap(ZapProtocol),
}

/// Arguments for a zap backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapRequest {
    pub vault: Address,
    pub token: Address,
    pub amount: U256,
    pub account: Address,
    pub slippage: Decimal,
    /// True when `token` is the native asset sentinel.
    pub is_native: bool,
    pub partner_id: Option<Address>,
    pub protocol: ZapProtocol,
}
