//! Cycle-accurate set-associative cache simulator library.
//!
//! This crate models a write-back cache in front of a flat memory and charges
//! every request with a deterministic cycle cost. It provides the following:
//! 1. **Common:** Strong address types, geometry constants, and error types.
//! 2. **Cache:** The set/way storage model, hit/miss handling, write-back
//!    accounting, and the read/write timing model.
//! 3. **Policies:** Interchangeable replacement policies (true LRU and a
//!    recency-bit pseudo-LRU) behind a common trait.
//! 4. **Simulation:** A synthetic matrix-multiply workload driver and
//!    per-policy comparison runs.
//! 5. **Configuration and statistics:** JSON-backed configuration and
//!    request/hit accounting with summary reporting.

/// Common types and constants (addresses, geometry, errors).
pub mod common;
/// Simulator configuration (defaults, enums, config structures).
pub mod config;
/// Hardware model (cache storage, engine, replacement policies).
pub mod core;
/// Workload driver and per-policy simulation runs.
pub mod sim;
/// Request statistics collection and summary reporting.
pub mod stats;

/// Physical address in the simulated 20-bit address space.
pub use crate::common::addr::Addr;
/// Library error type; the closed simulation has exactly one failure mode.
pub use crate::common::error::SimError;
/// Root configuration type; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// The cache engine; construct one per policy with `CacheSim::new`.
pub use crate::core::units::cache::CacheSim;
