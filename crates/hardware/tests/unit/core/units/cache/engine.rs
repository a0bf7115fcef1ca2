//! Cache engine unit tests.
//!
//! Exercises hit/miss determination, the read/write cycle-cost model,
//! dirty write-back accounting, counter monotonicity, and the policy
//! notification contract. Cycle numbers below follow the default timing
//! model: a cold read of one byte costs 173 cycles (108 miss path + 64
//! line refill + 1 data transfer), a warm read costs 9, and flushing a
//! dirty victim adds 102.

use cachesim_core::config::{ReplacementPolicy as PolicyType, SimConfig, TimingConfig};
use cachesim_core::core::units::cache::CacheSim;
use cachesim_core::{Addr, SimError};
use rstest::rstest;

use crate::common::mocks::policy::ScriptedPolicy;
use crate::common::set_addr;

/// Fresh cache under true LRU with default timing.
fn lru_cache() -> CacheSim {
    CacheSim::new(&SimConfig::default())
}

/// Fresh cache under pseudo-LRU with default timing.
fn plru_cache() -> CacheSim {
    let mut config = SimConfig::default();
    config.policy = PolicyType::Plru;
    CacheSim::new(&config)
}

// ══════════════════════════════════════════════════════════
// 1. Cold Miss / Warm Hit
// ══════════════════════════════════════════════════════════

/// A cold read misses, costs exactly 173 cycles, and installs the line
/// clean at set 0 with tag 0.
#[test]
fn cold_read_misses_and_installs() {
    let mut cache = lru_cache();
    let addr = Addr::new(0x00000);

    cache.read_request(addr, 1);

    assert_eq!(cache.elapsed_cycles(), 173);
    assert_eq!(cache.stats().requests, 1);
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.hit_rate(), Ok(0.0));
    assert!(cache.contains(addr), "missed line must be installed");
}

/// Repeating the read is a hit: 9 more cycles, hit rate 1/2.
#[test]
fn warm_read_hits() {
    let mut cache = lru_cache();
    let addr = Addr::new(0x00000);

    cache.read_request(addr, 1);
    cache.read_request(addr, 1);

    assert_eq!(cache.elapsed_cycles(), 173 + 9);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.hit_rate(), Ok(0.5));
}

/// A different offset in the same 128-byte line still hits.
#[test]
fn same_line_different_offset_hits() {
    let mut cache = lru_cache();

    cache.read_request(Addr::new(0x1000), 1);
    let before = cache.elapsed_cycles();

    // 0x1040 is byte 64 of the same line; 4-byte read hits for 8 + 2.
    cache.read_request(Addr::new(0x1040), 4);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.elapsed_cycles(), before + 10);
}

// ══════════════════════════════════════════════════════════
// 2. Timing Model
// ══════════════════════════════════════════════════════════

/// Read hits cost the fixed handshake plus one bus beat per 2 bytes.
#[rstest]
#[case(1, 9)]
#[case(2, 9)]
#[case(3, 10)]
#[case(4, 10)]
#[case(8, 12)]
#[case(16, 16)]
fn read_hit_cost(#[case] bytes: u32, #[case] cost: u64) {
    let mut cache = lru_cache();
    cache.read_request(Addr::new(0x2000), bytes);
    let before = cache.elapsed_cycles();
    cache.read_request(Addr::new(0x2000), bytes);
    assert_eq!(cache.elapsed_cycles(), before + cost);
}

/// Write hits overlap the lookup with the data transfer: small writes pay
/// the 6-cycle lookup floor, large ones the transfer.
#[rstest]
#[case(1, 8)]
#[case(4, 8)]
#[case(12, 8)]
#[case(16, 10)]
#[case(32, 18)]
fn write_hit_cost(#[case] bytes: u32, #[case] cost: u64) {
    let mut cache = lru_cache();
    cache.read_request(Addr::new(0x2000), 1);
    let before = cache.elapsed_cycles();
    cache.write_request(Addr::new(0x2000), bytes);
    assert_eq!(cache.elapsed_cycles(), before + cost);
}

/// Read misses with a clean victim cost the miss path, full line refill,
/// and the requested transfer.
#[rstest]
#[case(1, 173)]
#[case(2, 173)]
#[case(4, 174)]
#[case(16, 180)]
fn clean_read_miss_cost(#[case] bytes: u32, #[case] cost: u64) {
    let mut cache = plru_cache();
    cache.read_request(Addr::new(0x8000), bytes);
    assert_eq!(cache.elapsed_cycles(), cost);
}

/// A write miss allocates without a refill; with no dirty victim a small
/// write costs 1 + max(transfer, 5).
#[test]
fn clean_write_miss_cost() {
    let mut cache = lru_cache();
    cache.write_request(Addr::new(0x8000), 4);
    assert_eq!(cache.elapsed_cycles(), 6);
    assert_eq!(cache.stats().hits, 0);
    assert!(cache.contains(Addr::new(0x8000)));
}

/// `advance_time` adds exactly the supplied cycles and nothing else.
#[test]
fn advance_time_accumulates() {
    let mut cache = lru_cache();
    cache.advance_time(0);
    assert_eq!(cache.elapsed_cycles(), 0);
    cache.advance_time(7);
    cache.advance_time(3);
    assert_eq!(cache.elapsed_cycles(), 10);
    assert_eq!(cache.stats().requests, 0, "advance_time is not a request");
}

// ══════════════════════════════════════════════════════════
// 3. Dirty Write-back Accounting
// ══════════════════════════════════════════════════════════

/// Filling a set with four dirty lines and forcing a fifth install charges
/// the 102-cycle write-back exactly once.
#[test]
fn dirty_eviction_charged_once() {
    let mut cache = lru_cache();
    let set = 5;

    // Four cold write misses fill the set; all victims are invalid lines.
    for tag in 0..4 {
        cache.write_request(set_addr(tag, set), 4);
    }
    assert_eq!(cache.elapsed_cycles(), 4 * 6);

    // Fifth tag evicts the LRU line, which is dirty: 1 + max(2, 102 + 5).
    cache.write_request(set_addr(4, set), 4);
    assert_eq!(cache.elapsed_cycles(), 4 * 6 + 108);
    assert_eq!(cache.stats().requests, 5);
    assert_eq!(cache.stats().hits, 0);
}

/// The dirty bit set by a write survives intervening read hits, so the
/// eventual eviction still pays the write-back.
#[test]
fn dirty_bit_persists_across_read_hits() {
    let mut cache = lru_cache();
    let set = 9;

    cache.write_request(set_addr(0, set), 4);
    cache.read_request(set_addr(0, set), 1);
    for tag in 1..4 {
        cache.read_request(set_addr(tag, set), 1);
    }

    let before = cache.elapsed_cycles();
    // Evicts the dirty tag-0 line: 173 + 102.
    cache.read_request(set_addr(4, set), 1);
    assert_eq!(cache.elapsed_cycles(), before + 275);
}

/// Evicting a clean line pays no write-back.
#[test]
fn clean_eviction_no_penalty() {
    let mut cache = lru_cache();
    let set = 11;

    for tag in 0..4 {
        cache.read_request(set_addr(tag, set), 1);
    }
    let before = cache.elapsed_cycles();
    cache.read_request(set_addr(4, set), 1);
    assert_eq!(cache.elapsed_cycles(), before + 173);
}

/// The write-back check examines the line the policy chose as victim, not
/// any other resident line: evicting an invalid way next to a dirty line
/// is free, and evicting the dirty line itself pays 102.
#[test]
fn dirty_charge_follows_chosen_victim() {
    let (policy, _log) = ScriptedPolicy::new(&[0, 1, 0]);
    let mut cache = CacheSim::with_policy(Box::new(policy), TimingConfig::default());

    // Install a dirty line in way 0.
    cache.write_request(set_addr(0, 0), 1);
    assert_eq!(cache.elapsed_cycles(), 6);

    // Scripted victim way 1 is invalid: no write-back even though way 0
    // is dirty in the same set.
    cache.read_request(set_addr(1, 0), 1);
    assert_eq!(cache.elapsed_cycles(), 6 + 173);

    // Scripted victim way 0 is the dirty line: write-back charged.
    cache.read_request(set_addr(2, 0), 1);
    assert_eq!(cache.elapsed_cycles(), 6 + 173 + 275);
}

// ══════════════════════════════════════════════════════════
// 4. Policy Contract
// ══════════════════════════════════════════════════════════

/// Every access notifies the policy with the touched way: the victim way
/// on a miss, the resident way on a hit.
#[test]
fn policy_notified_on_every_access() {
    let (policy, log) = ScriptedPolicy::new(&[2, 3]);
    let mut cache = CacheSim::with_policy(Box::new(policy), TimingConfig::default());

    cache.read_request(set_addr(7, 3), 1); // miss, scripted victim way 2
    cache.read_request(set_addr(7, 3), 1); // hit in way 2
    cache.write_request(set_addr(9, 3), 1); // miss, scripted victim way 3

    let accesses = log.lock().unwrap().clone();
    assert_eq!(accesses, vec![(3, 2), (3, 2), (3, 3)]);
}

// ══════════════════════════════════════════════════════════
// 5. Invariants
// ══════════════════════════════════════════════════════════

/// Re-reading a resident tag never installs it twice: after touching four
/// distinct tags (one of them twice) all four are simultaneously resident.
#[test]
fn no_duplicate_resident_tags() {
    let mut cache = lru_cache();
    let set = 2;

    cache.read_request(set_addr(0, set), 1);
    cache.read_request(set_addr(0, set), 1); // hit, not a second install
    for tag in 1..4 {
        cache.read_request(set_addr(tag, set), 1);
    }

    for tag in 0..4 {
        assert!(cache.contains(set_addr(tag, set)), "tag {tag} evicted");
    }
    assert_eq!(cache.stats().requests, 5);
    assert_eq!(cache.stats().hits, 1);
}

/// Cycles and counters never decrease over a long mixed request stream,
/// and the hit counter never exceeds the request counter.
#[test]
fn counters_monotone_over_mixed_stream() {
    let mut cache = plru_cache();
    let mut last_cycles = 0;
    let mut last = cache.stats();

    for i in 0..500u32 {
        let addr = Addr::new((i * 977) & 0xFFFFF);
        if i % 3 == 0 {
            cache.write_request(addr, 4);
        } else {
            cache.read_request(addr, 2);
        }

        let stats = cache.stats();
        assert!(cache.elapsed_cycles() > last_cycles);
        assert_eq!(stats.requests, last.requests + 1);
        assert!(stats.hits >= last.hits);
        assert!(stats.hits <= stats.requests);
        last_cycles = cache.elapsed_cycles();
        last = stats;
    }
}

/// Querying the hit rate before any request is a loud error, not 0 or NaN.
#[test]
fn hit_rate_before_first_request_is_error() {
    let cache = lru_cache();
    assert_eq!(cache.hit_rate(), Err(SimError::NoRequests));
}
