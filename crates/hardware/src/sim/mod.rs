//! Simulation runs and the synthetic workload.
//!
//! Drives the cache engine: constructs one independent cache per policy,
//! replays the configured workload through it, and collects the end-of-run
//! measurements.

/// Matrix-multiply workload generator.
pub mod workload;

use self::workload::MatMulWorkload;
use crate::common::error::SimError;
use crate::config::{ReplacementPolicy, SimConfig};
use crate::core::units::cache::CacheSim;
use crate::stats::PolicyReport;

/// Runs the configured workload once against a single policy.
///
/// # Errors
///
/// Returns [`SimError::NoRequests`] if the workload issued no requests
/// (a zero-sized matrix dimension).
pub fn run_policy(
    config: &SimConfig,
    policy: ReplacementPolicy,
) -> Result<PolicyReport, SimError> {
    let mut run_config = config.clone();
    run_config.policy = policy;
    let mut cache = CacheSim::new(&run_config);
    MatMulWorkload::new(config.workload).run(&mut cache);
    Ok(PolicyReport {
        policy,
        hit_rate: cache.hit_rate()?,
        cycles: cache.elapsed_cycles(),
    })
}

/// Runs the workload once per policy on independent cache instances.
///
/// The request stream is identical for every policy, so the reports are
/// directly comparable.
///
/// # Errors
///
/// Propagates the first error from [`run_policy`].
pub fn run_comparison(config: &SimConfig) -> Result<Vec<PolicyReport>, SimError> {
    [ReplacementPolicy::Lru, ReplacementPolicy::Plru]
        .into_iter()
        .map(|policy| run_policy(config, policy))
        .collect()
}
