//! Yieldroute - vault aggregation and transaction routing for yield vaults.
//!
//! Reads vault records from an on-chain lens, enriches them with off-chain
//! metadata, and routes deposits and withdrawals either straight to the
//! vault or through a zap backend.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Vault, token, position, earnings, and transaction types
//! - [`port`] - Traits for every external collaborator
//! - [`application`] - Aggregation, enrichment, and routing use cases,
//!   bundled behind [`application::VaultInterface`]
//! - [`adapter`] - Cache store, token overrides, call encoders, and
//!   (feature `chain`) JSON-RPC adapters and the CLI
//! - [`infrastructure`] - Configuration, logging, and wiring
//!
//! # Features
//!
//! - `chain` - alloy-backed RPC adapters and the `yieldroute` binary (default)
//! - `testkit` - recording mocks and fixtures for integration tests
//!
//! # Example
//!
//! ```no_run
//! use yieldroute::application::VaultInterface;
//! use yieldroute::infrastructure::bootstrap::build_services;
//! use yieldroute::infrastructure::config::settings::Config;
//!
//! # async fn run() -> yieldroute::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let vaults = VaultInterface::new(build_services(&config)?);
//! let info = vaults.get_info("0xdA816459F1AB5631232FE5e97a05BBBb94970c95".parse().unwrap()).await?;
//! println!("{} reported at {}", info.name, info.last_report);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
