//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the vault services depend on:
//! the chain-side lens, metadata and pricing services, zap backends, the
//! partner wrapper, the transaction signer, and the cache store.

pub mod cache;
pub mod lens;
pub mod metadata;
pub mod properties;
pub mod token;
pub mod transaction;
pub mod zap;

pub use cache::CacheStore;
pub use lens::VaultLens;
pub use metadata::{AssetService, EarningsService, MetaService, StrategiesService, VisionService};
pub use properties::PropertiesAggregator;
pub use token::{AllowanceService, PriceOracle, TokenHelper, TokenMetadataHook};
pub use transaction::{PartnerService, TransactionSender, VaultContract};
pub use zap::ZapBackend;
