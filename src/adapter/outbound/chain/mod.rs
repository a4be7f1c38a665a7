//! On-chain adapters.
//!
//! Call encoders only need ABI types and are always built. RPC-backed
//! adapters need the `chain` feature.

pub mod partner;
pub mod vault_call;

#[cfg(feature = "chain")]
pub mod connection;
#[cfg(feature = "chain")]
pub mod erc20;
#[cfg(feature = "chain")]
pub mod properties;
#[cfg(feature = "chain")]
pub mod sender;

pub use partner::PartnerTracker;
pub use vault_call::VaultCallEncoder;

#[cfg(feature = "chain")]
pub use connection::ChainConnection;
#[cfg(feature = "chain")]
pub use erc20::Erc20Allowances;
#[cfg(feature = "chain")]
pub use properties::VaultPropertyReader;
#[cfg(feature = "chain")]
pub use sender::ChainSender;
