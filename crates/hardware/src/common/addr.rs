//! Physical address type and field decomposition.
//!
//! This module defines a strong type for the simulated 20-bit physical address
//! space and the pure decomposition into tag, set-index, and offset fields.
//! It provides the following:
//! 1. **Type Safety:** Addresses are not bare integers at module boundaries.
//! 2. **Decomposition:** Field extraction matching the fixed 9/4/7 bit split.
//! 3. **Reconstruction:** `from_parts` inverts the decomposition exactly.

use super::constants::{INDEX_BITS, INDEX_MASK, OFFSET_BITS, OFFSET_MASK, TAG_MASK};

/// A physical address in the simulated 20-bit address space.
///
/// Any value representable in 20 bits is a valid address; the workload
/// generator never issues anything larger. Decomposition is total and
/// side-effect free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw value.
    #[inline(always)]
    pub fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub fn val(&self) -> u32 {
        self.0
    }

    /// Extracts the tag: the high 9 bits identifying which memory line a
    /// cache line holds.
    #[inline]
    pub fn tag(&self) -> u32 {
        (self.0 >> (OFFSET_BITS + INDEX_BITS)) & TAG_MASK
    }

    /// Extracts the set index: the middle 4 bits selecting the set this
    /// address maps to.
    #[inline]
    pub fn set_index(&self) -> usize {
        ((self.0 >> OFFSET_BITS) & INDEX_MASK) as usize
    }

    /// Extracts the byte offset within the cache line (low 7 bits).
    ///
    /// The offset is part of the decomposition contract but carries no
    /// payload semantics; no data is modeled.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.0 & OFFSET_MASK
    }

    /// Rebuilds an address from its decomposed fields.
    ///
    /// Inverse of [`tag`](Self::tag), [`set_index`](Self::set_index), and
    /// [`offset`](Self::offset) for every 20-bit value.
    #[inline]
    pub fn from_parts(tag: u32, set_index: usize, offset: u32) -> Self {
        Self((tag << (OFFSET_BITS + INDEX_BITS)) | ((set_index as u32) << OFFSET_BITS) | offset)
    }
}
