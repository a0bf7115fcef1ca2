//! Set-associative write-back cache simulator.
//!
//! This module implements the cache engine: set/way storage with valid and
//! dirty metadata, hit/miss determination, victim installation with
//! write-back accounting, and the cycle-cost model for read and write
//! requests. Victim selection and recency updates are delegated to the
//! replacement policy injected at construction.

/// Cache replacement policy implementations (LRU, pseudo-LRU).
pub mod policies;

use tracing::trace;

use self::policies::{LruPolicy, PlruPolicy, ReplacementPolicy};
use crate::common::addr::Addr;
use crate::common::constants::{LINE_BYTES, LINE_COUNT, SETS, WAYS};
use crate::common::error::SimError;
use crate::config::{ReplacementPolicy as PolicyType, SimConfig, TimingConfig};
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
///
/// A line with `valid == false` holds no meaningful tag or dirty content and
/// can never satisfy a lookup. Recency state lives in the policy, not here.
#[derive(Clone, Copy, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
    dirty: bool,
}

/// Cache engine: a 16-set, 4-way write-back cache with cycle accounting.
///
/// Every request updates the elapsed-cycle counter and the request/hit
/// counters; all three are monotone. One instance is constructed per policy
/// under comparison, and instances share nothing.
pub struct CacheSim {
    /// Line metadata, set-major: index `set * WAYS + way`.
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy + Send + Sync>,
    timing: TimingConfig,
    stats: CacheStats,
    cycles: u64,
}

impl CacheSim {
    /// Creates a cache running the policy named in the configuration.
    ///
    /// All lines start invalid; counters and elapsed time start at zero.
    pub fn new(config: &SimConfig) -> Self {
        let policy: Box<dyn ReplacementPolicy + Send + Sync> = match config.policy {
            PolicyType::Lru => Box::new(LruPolicy::new(SETS, WAYS)),
            PolicyType::Plru => Box::new(PlruPolicy::new(SETS, WAYS)),
        };
        Self::with_policy(policy, config.timing)
    }

    /// Creates a cache around an explicit policy instance.
    ///
    /// The policy must be sized for [`SETS`] sets of [`WAYS`] ways.
    pub fn with_policy(
        policy: Box<dyn ReplacementPolicy + Send + Sync>,
        timing: TimingConfig,
    ) -> Self {
        Self {
            lines: vec![CacheLine::default(); LINE_COUNT],
            policy,
            timing,
            stats: CacheStats::default(),
            cycles: 0,
        }
    }

    /// Issues a read of `byte_count` bytes at `addr`.
    ///
    /// On a hit the cost is the hit handshake plus the CPU-bus transfer of
    /// the requested bytes. On a miss the cost adds the memory round trip,
    /// the full line refill, and the write-back of the victim line if it was
    /// valid and dirty; the requested tag is then installed clean.
    pub fn read_request(&mut self, addr: Addr, byte_count: u32) {
        let set = addr.set_index();
        let t = self.timing;
        match self.find_way(addr) {
            Some(way) => {
                self.cycles += t.query + t.hit_ping + t.cpu_transfer(byte_count) + t.response;
                self.policy.update(set, way);
                self.stats.record(true);
            }
            None => {
                let way = self.policy.get_victim(set);
                let evict = self.writeback_cycles(set, way);
                self.cycles += t.query
                    + t.miss_ping
                    + evict
                    + t.query
                    + t.mem_ping
                    + t.mem_transfer(LINE_BYTES as u32)
                    + t.response
                    + t.cpu_transfer(byte_count)
                    + t.response;
                trace!(addr = addr.val(), set, way, evict, "read miss");
                self.install(set, way, addr.tag(), false);
                self.policy.update(set, way);
                self.stats.record(false);
            }
        }
    }

    /// Issues a write of `byte_count` bytes at `addr`.
    ///
    /// On a hit the resident line is marked dirty and the cost is the larger
    /// of the lookup handshake and the CPU-bus transfer. On a miss the line
    /// is allocated dirty without a refill (the payload overwrites it), and
    /// the victim write-back overlaps the CPU-bus transfer.
    pub fn write_request(&mut self, addr: Addr, byte_count: u32) {
        let set = addr.set_index();
        let t = self.timing;
        match self.find_way(addr) {
            Some(way) => {
                self.cycles +=
                    t.query + t.hit_ping.max(t.cpu_transfer(byte_count)) + t.response;
                self.lines[set * WAYS + way].dirty = true;
                self.policy.update(set, way);
                self.stats.record(true);
            }
            None => {
                let way = self.policy.get_victim(set);
                let evict = self.writeback_cycles(set, way);
                self.cycles += t.query
                    + t.cpu_transfer(byte_count)
                        .max(t.miss_ping + evict + t.response);
                trace!(addr = addr.val(), set, way, evict, "write miss");
                self.install(set, way, addr.tag(), true);
                self.policy.update(set, way);
                self.stats.record(false);
            }
        }
    }

    /// Adds caller-supplied cycles to the running total.
    ///
    /// Used by the workload driver to account for instruction overhead
    /// (register writes, loop bookkeeping) that is not itself a cache access.
    pub fn advance_time(&mut self, cycles: u64) {
        self.cycles += cycles;
    }

    /// Returns the total elapsed simulated cycles.
    pub fn elapsed_cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the running hit rate in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoRequests`] if queried before any request.
    pub fn hit_rate(&self) -> Result<f64, SimError> {
        self.stats.hit_rate()
    }

    /// Returns the request/hit counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Checks whether the line holding `addr` is resident.
    pub fn contains(&self, addr: Addr) -> bool {
        self.find_way(addr).is_some()
    }

    /// Way index of the valid line in `addr`'s set carrying `addr`'s tag.
    ///
    /// At most one line per set can match: installs go through `find_way`
    /// first, so a tag is never installed twice into one set.
    fn find_way(&self, addr: Addr) -> Option<usize> {
        let base = addr.set_index() * WAYS;
        let tag = addr.tag();
        (0..WAYS).find(|&way| {
            let line = &self.lines[base + way];
            line.valid && line.tag == tag
        })
    }

    /// Write-back cost for evicting `(set, way)`.
    ///
    /// Charged only when the line the policy chose is both valid and dirty:
    /// its contents differ from backing memory and must be flushed before
    /// the way is reused. Clean and invalid victims cost nothing.
    fn writeback_cycles(&self, set: usize, way: usize) -> u64 {
        let line = &self.lines[set * WAYS + way];
        if line.valid && line.dirty {
            let t = self.timing;
            t.query + t.mem_ping.max(t.mem_transfer(LINE_BYTES as u32)) + t.response
        } else {
            0
        }
    }

    /// Installs `tag` into `(set, way)`, replacing whatever was there.
    fn install(&mut self, set: usize, way: usize, tag: u32, dirty: bool) {
        self.lines[set * WAYS + way] = CacheLine {
            tag,
            valid: true,
            dirty,
        };
    }
}

impl std::fmt::Debug for CacheSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSim")
            .field("cycles", &self.cycles)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
