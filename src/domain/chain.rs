//! Chain identifiers and well-known addresses.

use std::fmt;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sentinel address standing in for the chain's native asset.
///
/// Users deposit the native asset directly; routing and icon lookups use this
/// address in place of the wrapped token.
pub const NATIVE_ASSET_ADDRESS: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

const WETH_MAINNET: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const WETH_OPTIMISM: Address = address!("4200000000000000000000000000000000000006");
const WFTM_FANTOM: Address = address!("21be370D5312f44cB42ce377BC9b8a0cEF1A4C83");
const WETH_ARBITRUM: Address = address!("82aF49447D8a07e3bd95BD0d56f35241523fBab1");

/// Chains the vault aggregation supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum ChainId {
    #[default]
    Mainnet,
    Optimism,
    Fantom,
    Arbitrum,
    /// Local fork of mainnet.
    Local,
}

impl ChainId {
    /// Numeric EIP-155 chain id.
    #[must_use]
    pub const fn id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Optimism => 10,
            Self::Fantom => 250,
            Self::Arbitrum => 42161,
            Self::Local => 1337,
        }
    }

    /// Wrapped form of the native asset on this chain.
    #[must_use]
    pub const fn wrapped_native(self) -> Address {
        match self {
            Self::Mainnet | Self::Local => WETH_MAINNET,
            Self::Optimism => WETH_OPTIMISM,
            Self::Fantom => WFTM_FANTOM,
            Self::Arbitrum => WETH_ARBITRUM,
        }
    }
}

impl TryFrom<u64> for ChainId {
    type Error = ConfigError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::Mainnet),
            10 => Ok(Self::Optimism),
            250 => Ok(Self::Fantom),
            42161 => Ok(Self::Arbitrum),
            1337 => Ok(Self::Local),
            other => Err(ConfigError::InvalidValue {
                field: "chain_id",
                reason: format!("unsupported chain {other}"),
            }),
        }
    }
}

impl From<ChainId> for u64 {
    fn from(chain: ChainId) -> Self {
        chain.id()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_round_trips_supported_ids() {
        for chain in [
            ChainId::Mainnet,
            ChainId::Optimism,
            ChainId::Fantom,
            ChainId::Arbitrum,
            ChainId::Local,
        ] {
            assert_eq!(ChainId::try_from(chain.id()).unwrap(), chain);
        }
    }

    #[test]
    fn chain_id_rejects_unknown_chain() {
        assert!(matches!(
            ChainId::try_from(56),
            Err(ConfigError::InvalidValue {
                field: "chain_id",
                ..
            })
        ));
    }

    #[test]
    fn local_fork_shares_mainnet_weth() {
        assert_eq!(
            ChainId::Local.wrapped_native(),
            ChainId::Mainnet.wrapped_native()
        );
    }
}
