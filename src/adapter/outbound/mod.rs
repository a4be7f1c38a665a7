//! Outbound adapters (driven side).

pub mod cache;
pub mod chain;
pub mod overrides;
pub mod unconfigured;
