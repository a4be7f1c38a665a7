//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The aggregation and routing services talk to every external system
//! through these traits. Adapters implement them; tests swap in the
//! recording mocks from `testkit`.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  aggregation + routing   │
//!                 └────────────┬─────────────┘
//!                              │ ports
//!     ┌──────────┬─────────────┼─────────────┬──────────────┐
//!     ▼          ▼             ▼             ▼              ▼
//! ┌────────┐ ┌────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐
//! │  Lens  │ │  Meta  │  │  Tokens  │  │   Zaps   │  │   Signer   │
//! └────────┘ └────────┘  └──────────┘  └──────────┘  └────────────┘
//! ```

pub mod outbound;
