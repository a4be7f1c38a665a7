//! RPC endpoint and optional signing key shared by the chain adapters.

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_provider::network::EthereumWallet;
use alloy_signer::Signer as _;
use alloy_signer_local::PrivateKeySigner;
use url::Url;

use crate::domain::ChainId;
use crate::error::{ConfigError, Result};

/// Connection settings for one chain.
///
/// Providers are built per call from the stored URL; only the signer is
/// long-lived.
#[derive(Debug, Clone)]
pub struct ChainConnection {
    rpc_url: Url,
    signer: Option<PrivateKeySigner>,
}

impl ChainConnection {
    /// Read-only connection to `rpc_url`.
    pub fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            signer: None,
        }
    }

    /// Attach a signing key for writes on `chain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or not a valid secp256k1 key.
    pub fn with_private_key(mut self, private_key: &str, chain: ChainId) -> Result<Self> {
        let key = private_key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        let signer = PrivateKeySigner::from_str(key)
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?
            .with_chain_id(Some(chain.id()));
        self.signer = Some(signer);
        Ok(self)
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Signer for writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection was built without a key.
    pub fn signer(&self) -> Result<&PrivateKeySigner> {
        self.signer.as_ref().ok_or_else(|| {
            ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into()
        })
    }

    /// Address of the signing key, if one is attached.
    #[must_use]
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    /// Wallet wrapping the signer, for write providers.
    pub fn wallet(&self) -> Result<EthereumWallet> {
        Ok(EthereumWallet::from(self.signer()?.clone()))
    }
}
