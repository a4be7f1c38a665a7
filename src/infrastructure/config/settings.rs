//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file with environment variable
//! overrides for the RPC endpoint and the signing key.
//!
//! # Example
//!
//! ```no_run
//! use yieldroute::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use alloy_primitives::Address;
use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::overrides::TokenOverride;
use crate::domain::ChainId;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `[rpc] url`.
pub const RPC_URL_ENV: &str = "YIELDROUTE_RPC_URL";

/// Environment variable holding the signing key.
pub const PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

/// JSON-RPC endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8545".into(),
        }
    }
}

/// Read-through cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Serve unfiltered reads from the cache when a list is present.
    pub enabled: bool,
    /// Seconds a cached list stays valid.
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Entry lifetime, or `None` when the cache is disabled.
    #[must_use]
    pub fn ttl(&self) -> Option<Duration> {
        self.enabled.then(|| Duration::from_secs(self.ttl_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: 300,
        }
    }
}

/// Partner tracker wrapping direct deposits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerConfig {
    /// Identifier credited for wrapped deposits and zaps.
    #[serde(default)]
    pub id: Option<Address>,
    /// Tracker contract.
    pub address: Address,
    /// Vaults the partner wraps. Omitted means every vault.
    #[serde(default)]
    pub vaults: Option<Vec<Address>>,
}

/// Signing key settings.
/// The key is loaded from `WALLET_PRIVATE_KEY` at runtime, never from the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(skip)]
    pub private_key: Option<String>,
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Chain the vaults live on. Defaults to mainnet.
    #[serde(default)]
    pub chain_id: ChainId,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// JSON-RPC endpoint. `YIELDROUTE_RPC_URL` takes precedence.
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Vault and token list caching.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Optional deposit partner.
    #[serde(default)]
    pub partner: Option<PartnerConfig>,

    /// Per-token corrections applied after enrichment.
    #[serde(default)]
    pub token_overrides: Vec<TokenOverride>,

    /// Signing key, populated from the environment.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies `YIELDROUTE_RPC_URL` and loads the private key from
    /// `WALLET_PRIVATE_KEY` before validating.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            config.rpc.url = url;
        }
        config.wallet.private_key = std::env::var(PRIVATE_KEY_ENV).ok();

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.rpc.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "rpc.url" }.into());
        }
        self.rpc_url()?;
        self.logging.filter()?;

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_secs",
                reason: "must be greater than 0 when the cache is enabled".to_string(),
            }
            .into());
        }

        if let Some(partner) = &self.partner {
            if partner.id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "partner.id",
                }
                .into());
            }
        }

        if let Some(o) = self.token_overrides.iter().find(|o| o.address == Address::ZERO) {
            return Err(ConfigError::InvalidValue {
                field: "token_overrides",
                reason: format!("override {o:?} has no address"),
            }
            .into());
        }

        Ok(())
    }

    /// Parsed RPC endpoint.
    #[allow(clippy::result_large_err)]
    pub fn rpc_url(&self) -> Result<Url> {
        Url::parse(self.rpc.url.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "rpc.url",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
