//! Global cache geometry constants.
//!
//! This module defines the fixed geometry of the simulated memory hierarchy.
//! It includes:
//! 1. **Address layout:** Field widths and masks for the tag/index/offset split.
//! 2. **Cache shape:** Line size, associativity, and set count.
//! 3. **Capacities:** Total cache and backing memory sizes.
//!
//! The geometry is fixed at build time. Timing parameters, in contrast, live
//! in [`crate::config`] and may be overridden per run.

/// Physical address width in bits.
pub const ADDR_BITS: u32 = 20;

/// Cache line size in bytes.
pub const LINE_BYTES: usize = 128;

/// Associativity: number of ways (lines) per set.
pub const WAYS: usize = 4;

/// Tag field width in bits.
pub const TAG_BITS: u32 = 9;

/// Offset field width in bits: `log2(LINE_BYTES)`.
pub const OFFSET_BITS: u32 = LINE_BYTES.trailing_zeros();

/// Set-index field width in bits; the remainder of the address.
pub const INDEX_BITS: u32 = ADDR_BITS - TAG_BITS - OFFSET_BITS;

/// Number of sets in the cache.
pub const SETS: usize = 1 << INDEX_BITS;

/// Total number of cache lines.
pub const LINE_COUNT: usize = SETS * WAYS;

/// Total cache capacity in bytes.
pub const CACHE_BYTES: usize = LINE_COUNT * LINE_BYTES;

/// Backing memory capacity in bytes.
pub const MEM_BYTES: usize = 1 << ADDR_BITS;

/// Mask covering every representable address.
pub const ADDR_MASK: u32 = (1 << ADDR_BITS) - 1;

/// Mask for extracting the tag field after shifting.
pub const TAG_MASK: u32 = (1 << TAG_BITS) - 1;

/// Mask for extracting the set-index field after shifting.
pub const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Mask for extracting the byte offset within a line.
pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
