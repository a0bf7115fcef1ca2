//! Synthetic matrix-multiply workload.
//!
//! Emulates the memory traffic of a register-allocated triple-nested loop
//! computing `C = A * B` over three flat row-major buffers: per inner
//! iteration one element of A and one of B are read, and each finished dot
//! product writes one element of C. The request sequence is fully
//! deterministic, so identical configurations produce identical cycle totals.
//!
//! Loop and pointer bookkeeping that touches only registers is charged via
//! [`CacheSim::advance_time`] rather than as cache traffic.

use tracing::debug;

use crate::common::addr::Addr;
use crate::config::WorkloadConfig;
use crate::core::units::cache::CacheSim;

/// Deterministic matrix-multiply request generator.
///
/// Stateless between runs: `run` may be called repeatedly, each time issuing
/// the same request sequence.
#[derive(Debug, Clone, Copy)]
pub struct MatMulWorkload {
    config: WorkloadConfig,
}

impl MatMulWorkload {
    /// Creates a workload over the given dimensions and buffer placement.
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    /// Replays the full access sequence through `cache`.
    ///
    /// A is walked a row at a time (unit stride), B a column at a time
    /// (stride of one row), C row-major. The bookkeeping charges mirror the
    /// scalar instruction stream of the loop nest.
    pub fn run(&self, cache: &mut CacheSim) {
        let w = &self.config;
        debug!(m = w.m, n = w.n, k = w.k, "matmul workload start");

        let mut pa = w.a_base;
        let mut pc = w.c_base;
        cache.advance_time(2); // pa/pc setup

        cache.advance_time(1); // row counter init
        for _y in 0..w.m {
            cache.advance_time(1); // column counter init
            for x in 0..w.n {
                let mut pb = w.b_base;
                cache.advance_time(2); // pb and accumulator setup

                cache.advance_time(1); // inner counter init
                for k in 0..w.k {
                    cache.advance_time(6); // multiply and accumulate
                    cache.read_request(Addr::new(pa + k * w.a_elem), w.a_elem);
                    cache.read_request(Addr::new(pb + x * w.b_elem), w.b_elem);
                    pb += w.n * w.b_elem;
                    cache.advance_time(1); // pb bump

                    cache.advance_time(2); // counter increment, branch
                }

                cache.write_request(Addr::new(pc + x * w.c_elem), w.c_elem);
                cache.advance_time(2); // counter increment, branch
            }

            pa += w.k * w.a_elem;
            cache.advance_time(1); // pa bump
            pc += w.n * w.c_elem;
            cache.advance_time(1); // pc bump
            cache.advance_time(2); // counter increment, branch
        }

        cache.advance_time(1); // return
    }
}
