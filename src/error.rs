use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Upstream data broke an invariant the aggregation relies on.
///
/// Never retried; the offending address is always named.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Dynamic asset does not exist for {address}")]
    DynamicAssetMissing { address: Address },

    #[error("Token does not exist for Balance({address})")]
    TokenMissing { address: Address },

    #[error("Vault does not exist for {address}")]
    VaultMissing { address: Address },

    #[error("last report timestamp {value} is out of range")]
    InvalidTimestamp { value: U256 },
}

/// Caller input rejected before any transaction is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("zap operations should have a slippage set")]
    MissingSlippage,
}

/// Routing could not find a path for the requested operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("no zap backend supports vault {vault}")]
    NoZapBackend { vault: Address },
}

/// A collaborator call was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} failed: {message}")]
pub struct UpstreamError {
    /// Collaborator name, for logs and messages.
    pub service: &'static str,
    /// Failure description reported by the collaborator.
    pub message: String,
}

impl UpstreamError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Shorthand for wrapping a collaborator failure.
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError::new(service, message))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
