//! Hardware model.
//!
//! Holds the simulated hardware units. The only unit in this simulator is the
//! cache; the CPU side is abstracted as the request stream a workload driver
//! issues, and the memory side as a latency constant.

/// Simulated hardware units.
pub mod units;
