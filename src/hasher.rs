//! Deterministic default hasher for the bucket table.
//!
//! The first integer written becomes the state as-is, so a lone unsigned
//! integer key hashes to itself and dense integer keys spread evenly across
//! `2^c - 1` slots. Every later write first runs the state through an
//! avalanche step, so multi-field keys (tuples, structs, wide integers) do
//! not cancel out. Byte strings are folded FNV-1a style.

use core::hash::{BuildHasher, Hasher};

const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

#[derive(Copy, Clone, Debug, Default)]
pub struct SlotHasher {
    hash: u64,
    written: bool,
}

// Bijective 64-bit finalizer (splitmix64).
#[inline]
fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 30;
    h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 31)
}

impl SlotHasher {
    pub const fn new() -> Self {
        Self {
            hash: 0,
            written: false,
        }
    }

    #[inline]
    fn fold(&mut self, n: u64) {
        self.hash = if self.written {
            avalanche(self.hash) ^ n
        } else {
            n
        };
        self.written = true;
    }
}

impl Hasher for SlotHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.written {
            self.hash = avalanche(self.hash);
        }
        self.written = true;
        for &b in bytes {
            self.hash ^= b as u64;
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn write_u8(&mut self, n: u8) {
        self.fold(n as u64);
    }

    #[inline]
    fn write_u16(&mut self, n: u16) {
        self.fold(n as u64);
    }

    #[inline]
    fn write_u32(&mut self, n: u32) {
        self.fold(n as u64);
    }

    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.fold(n);
    }

    #[inline]
    fn write_u128(&mut self, n: u128) {
        // High half first so values below 2^64 keep the identity hash.
        self.fold((n >> 64) as u64);
        self.fold(n as u64);
    }

    #[inline]
    fn write_usize(&mut self, n: usize) {
        self.fold(n as u64);
    }
}

/// `BuildHasher` producing [`SlotHasher`]; the default for `BucketMap`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SlotBuildHasher;

impl BuildHasher for SlotBuildHasher {
    type Hasher = SlotHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SlotHasher::new()
    }
}
