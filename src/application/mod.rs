//! Application services (use cases).
//!
//! These services orchestrate domain logic over the outbound ports to
//! implement vault aggregation and transaction routing.

pub mod assets;
pub mod cache_gate;
pub mod earnings;
pub mod info;
pub mod positions;
pub mod router;
pub mod services;
pub mod tokens;
pub mod vaults;

pub use assets::AssetAggregator;
pub use cache_gate::CacheGate;
pub use earnings::EarningsSummarizer;
pub use info::InfoReader;
pub use positions::PositionResolver;
pub use router::TransactionRouter;
pub use services::{VaultCaches, VaultServices};
pub use tokens::TokenEnricher;
pub use vaults::VaultInterface;
