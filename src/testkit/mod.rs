//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for vault, token, and earnings records.
//! - [`mocks`] - Recording mocks for every outbound port, bundled by
//!   [`mocks::MockSet`].

pub mod domain;
pub mod mocks;
