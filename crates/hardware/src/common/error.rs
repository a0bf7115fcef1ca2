//! Simulator error definitions.
//!
//! The simulation runs over internally generated, always-valid addresses, so
//! there is no input to validate at runtime. The one defined failure mode is
//! querying a statistic that is undefined before any request has been issued.

use thiserror::Error;

/// Errors surfaced by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// The hit rate was queried before any request was issued.
    ///
    /// A zero-request run indicates a driver bug; the division is rejected
    /// loudly instead of returning 0 or NaN.
    #[error("hit rate queried before any request was issued")]
    NoRequests,
}
