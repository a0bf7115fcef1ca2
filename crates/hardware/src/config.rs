//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline timing and workload constants.
//! 2. **Structures:** Hierarchical config for policy, timing, and workload.
//! 3. **Enums:** The replacement-policy selector.
//!
//! Configuration is supplied as JSON (see the example below) or via
//! `SimConfig::default()`. The cache geometry itself (line size, ways, sets,
//! address split) is fixed at build time in [`crate::common::constants`] and
//! is deliberately not runtime-tunable; changing it would change the address
//! decomposition contract, not just the timing.

use std::fmt;

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline timing model and workload when not
/// explicitly overridden in a JSON configuration.
mod defaults {
    /// CPU-side data bus width in bits (CPU to cache transfers).
    pub const DATA_BUS_BITS: u32 = 16;

    /// Memory-side data bus width in bits (cache to memory line refills).
    pub const MEM_BUS_BITS: u32 = 16;

    /// Cycles to place a query and address on either bus.
    pub const QUERY_CYCLES: u64 = 1;

    /// Cycles for the responder to signal completion.
    pub const RESPONSE_CYCLES: u64 = 1;

    /// Cache lookup latency when the line is resident.
    pub const HIT_PING: u64 = 6;

    /// Cache lookup latency when the lookup misses.
    ///
    /// Shorter than [`HIT_PING`]: a miss is detected before the data array
    /// would be read, and the remaining cost is charged on the memory path.
    pub const MISS_PING: u64 = 4;

    /// Backing memory access latency in cycles.
    pub const MEM_PING: u64 = 100;

    /// Result matrix row count (M).
    pub const MAT_M: u32 = 64;

    /// Result matrix column count (N).
    pub const MAT_N: u32 = 60;

    /// Inner (shared) matrix dimension (K).
    pub const MAT_K: u32 = 32;

    /// Base address of matrix A (M x K).
    pub const A_BASE: u32 = 0x40000;

    /// Element width of matrix A in bytes.
    pub const A_ELEM: u32 = 1;

    /// Element width of matrix B in bytes.
    pub const B_ELEM: u32 = 2;

    /// Element width of matrix C in bytes.
    pub const C_ELEM: u32 = 4;
}

/// Cache replacement policy algorithms.
///
/// Selects the algorithm used to pick a victim line when a miss must install
/// a new line into a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// True Least Recently Used replacement.
    ///
    /// Maintains a full recency order per set and evicts the line that was
    /// accessed least recently.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Recency-bit pseudo-LRU replacement.
    ///
    /// Tracks a single recency bit per line and evicts a not-recently-used
    /// line. Deliberately coarser than true LRU so the two stay behaviorally
    /// distinct for comparison.
    #[serde(alias = "Plru")]
    Plru,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "LRU"),
            Self::Plru => write!(f, "PLRU"),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.timing.mem_ping, 100);
/// assert_eq!(config.workload.m, 64);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{ReplacementPolicy, SimConfig};
///
/// let json = r#"{
///     "policy": "PLRU",
///     "timing": {
///         "mem_ping": 100,
///         "hit_ping": 6
///     },
///     "workload": {
///         "m": 8,
///         "n": 8,
///         "k": 8
///     }
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Plru);
/// assert_eq!(config.workload.m, 8);
/// assert_eq!(config.timing.query, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimConfig {
    /// Replacement policy under test.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Timing model parameters.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Workload dimensions and matrix placement.
    #[serde(default)]
    pub workload: WorkloadConfig,
}

/// Timing model parameters.
///
/// Every request cost is assembled from these values. Bus transfer cycles are
/// `ceil(bytes * 8 / bus_bits)`; the remaining fields are fixed handshake and
/// device latencies.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimingConfig {
    /// CPU-side data bus width in bits.
    #[serde(default = "TimingConfig::default_data_bus_bits")]
    pub data_bus_bits: u32,

    /// Memory-side data bus width in bits.
    #[serde(default = "TimingConfig::default_mem_bus_bits")]
    pub mem_bus_bits: u32,

    /// Cycles to place a query and address on a bus.
    #[serde(default = "TimingConfig::default_query")]
    pub query: u64,

    /// Cycles for a responder to signal completion.
    #[serde(default = "TimingConfig::default_response")]
    pub response: u64,

    /// Cache lookup latency on a hit.
    #[serde(default = "TimingConfig::default_hit_ping")]
    pub hit_ping: u64,

    /// Cache lookup latency on a miss.
    #[serde(default = "TimingConfig::default_miss_ping")]
    pub miss_ping: u64,

    /// Backing memory access latency.
    #[serde(default = "TimingConfig::default_mem_ping")]
    pub mem_ping: u64,
}

impl TimingConfig {
    /// Returns the default CPU-side data bus width in bits.
    fn default_data_bus_bits() -> u32 {
        defaults::DATA_BUS_BITS
    }

    /// Returns the default memory-side data bus width in bits.
    fn default_mem_bus_bits() -> u32 {
        defaults::MEM_BUS_BITS
    }

    /// Returns the default bus query cost in cycles.
    fn default_query() -> u64 {
        defaults::QUERY_CYCLES
    }

    /// Returns the default bus response cost in cycles.
    fn default_response() -> u64 {
        defaults::RESPONSE_CYCLES
    }

    /// Returns the default hit lookup latency in cycles.
    fn default_hit_ping() -> u64 {
        defaults::HIT_PING
    }

    /// Returns the default miss lookup latency in cycles.
    fn default_miss_ping() -> u64 {
        defaults::MISS_PING
    }

    /// Returns the default backing memory latency in cycles.
    fn default_mem_ping() -> u64 {
        defaults::MEM_PING
    }

    /// Cycles to move `bytes` across the CPU-side data bus.
    #[inline]
    pub fn cpu_transfer(&self, bytes: u32) -> u64 {
        (u64::from(bytes) * 8).div_ceil(u64::from(self.data_bus_bits))
    }

    /// Cycles to move `bytes` across the memory-side data bus.
    #[inline]
    pub fn mem_transfer(&self, bytes: u32) -> u64 {
        (u64::from(bytes) * 8).div_ceil(u64::from(self.mem_bus_bits))
    }
}

impl Default for TimingConfig {
    /// Creates the default timing model.
    fn default() -> Self {
        Self {
            data_bus_bits: defaults::DATA_BUS_BITS,
            mem_bus_bits: defaults::MEM_BUS_BITS,
            query: defaults::QUERY_CYCLES,
            response: defaults::RESPONSE_CYCLES,
            hit_ping: defaults::HIT_PING,
            miss_ping: defaults::MISS_PING,
            mem_ping: defaults::MEM_PING,
        }
    }
}

/// Matrix-multiply workload dimensions and buffer placement.
///
/// The default layout places the three matrices back to back starting at
/// `0x40000`: A (M x K, 1-byte elements), then B (K x N, 2-byte elements),
/// then C (M x N, 4-byte elements). Every generated address stays below the
/// 2^20-byte memory capacity.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WorkloadConfig {
    /// Result matrix row count.
    #[serde(default = "WorkloadConfig::default_m")]
    pub m: u32,

    /// Result matrix column count.
    #[serde(default = "WorkloadConfig::default_n")]
    pub n: u32,

    /// Inner (shared) dimension.
    #[serde(default = "WorkloadConfig::default_k")]
    pub k: u32,

    /// Base address of matrix A.
    #[serde(default = "WorkloadConfig::default_a_base")]
    pub a_base: u32,

    /// Element width of matrix A in bytes.
    #[serde(default = "WorkloadConfig::default_a_elem")]
    pub a_elem: u32,

    /// Base address of matrix B.
    #[serde(default = "WorkloadConfig::default_b_base")]
    pub b_base: u32,

    /// Element width of matrix B in bytes.
    #[serde(default = "WorkloadConfig::default_b_elem")]
    pub b_elem: u32,

    /// Base address of matrix C.
    #[serde(default = "WorkloadConfig::default_c_base")]
    pub c_base: u32,

    /// Element width of matrix C in bytes.
    #[serde(default = "WorkloadConfig::default_c_elem")]
    pub c_elem: u32,
}

impl WorkloadConfig {
    /// Returns the default result matrix row count.
    fn default_m() -> u32 {
        defaults::MAT_M
    }

    /// Returns the default result matrix column count.
    fn default_n() -> u32 {
        defaults::MAT_N
    }

    /// Returns the default inner dimension.
    fn default_k() -> u32 {
        defaults::MAT_K
    }

    /// Returns the default base address of matrix A.
    fn default_a_base() -> u32 {
        defaults::A_BASE
    }

    /// Returns the default element width of matrix A.
    fn default_a_elem() -> u32 {
        defaults::A_ELEM
    }

    /// Returns the default base address of matrix B: directly after A.
    fn default_b_base() -> u32 {
        defaults::A_BASE + defaults::MAT_M * defaults::MAT_K * defaults::A_ELEM
    }

    /// Returns the default element width of matrix B.
    fn default_b_elem() -> u32 {
        defaults::B_ELEM
    }

    /// Returns the default base address of matrix C: directly after B.
    fn default_c_base() -> u32 {
        Self::default_b_base() + defaults::MAT_K * defaults::MAT_N * defaults::B_ELEM
    }

    /// Returns the default element width of matrix C.
    fn default_c_elem() -> u32 {
        defaults::C_ELEM
    }
}

impl Default for WorkloadConfig {
    /// Creates the default M=64, N=60, K=32 workload with back-to-back
    /// matrix placement.
    fn default() -> Self {
        Self {
            m: defaults::MAT_M,
            n: defaults::MAT_N,
            k: defaults::MAT_K,
            a_base: defaults::A_BASE,
            a_elem: defaults::A_ELEM,
            b_base: Self::default_b_base(),
            b_elem: defaults::B_ELEM,
            c_base: Self::default_c_base(),
            c_elem: defaults::C_ELEM,
        }
    }
}
