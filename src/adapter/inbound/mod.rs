//! Inbound adapters (driving side).

#[cfg(feature = "chain")]
pub mod cli;
