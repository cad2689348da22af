// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! Keyed bit-slot permutation and its incremental reader.
//!
//! The permutation is a bijection over `[0, capacity_bits)`: logical
//! payload-bit index `i` occupies physical carrier bit-slot
//! `permutation[i]`. It is built by applying a Fisher-Yates shuffle, keyed
//! by the passphrase digest, to the identity sequence — both encoder and
//! decoder derive the identical ordering from the passphrase alone.
//!
//! # Cross-platform portability
//!
//! The Fisher-Yates shuffle uses `u32` for `gen_range` (not `usize`) to
//! ensure identical permutations on all platforms. `usize` is 32-bit on
//! WASM but 64-bit on native, which causes `rand::Rng::gen_range` to
//! consume different amounts of PRNG entropy per step — producing
//! completely different shuffles.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::carrier::RgbCarrier;
use crate::stego::capacity::BitDepth;
use crate::stego::error::StegoError;
use crate::stego::keystream;

/// A keyed bijection from logical payload-bit indices to carrier bit-slots.
pub struct SlotPermutation {
    slots: Vec<u32>,
}

impl SlotPermutation {
    /// Derive the permutation for a passphrase and capacity.
    ///
    /// Deterministic in both arguments; recomputed per call, never cached.
    pub fn derive(passphrase: &[u8], capacity_bits: u32) -> Self {
        let seed = keystream::derive_seed(passphrase);
        let mut slots: Vec<u32> = (0..capacity_bits).collect();
        let mut rng = ChaCha20Rng::from_seed(*seed);
        for i in (1..slots.len()).rev() {
            let j = rng.gen_range(0..=(i as u32)) as usize;
            slots.swap(i, j);
        }
        Self { slots }
    }

    /// Number of slots, equal to the capacity the permutation was built for.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The carrier bit-slot holding logical payload bit `index`.
    pub fn slot(&self, index: usize) -> u32 {
        self.slots[index]
    }
}

/// Incremental reader of carrier bits in permutation order.
///
/// The progressive extractor does not know up front how many bits it
/// needs; this reader lets it take "the next K permuted bits" repeatedly.
/// The cursor only moves forward — each read extends the previous one, so
/// partial reads are monotonic and never re-derive the permutation or
/// restart from index 0.
pub struct SlotReader<'a> {
    channels: &'a [u8],
    depth_bits: u32,
    perm: SlotPermutation,
    cursor: usize,
}

impl<'a> SlotReader<'a> {
    /// Build a reader over the carrier's channels at the given depth.
    pub fn new(
        carrier: &'a RgbCarrier,
        passphrase: &[u8],
        depth: BitDepth,
    ) -> Result<Self, StegoError> {
        let capacity = u32::try_from(carrier.capacity_bits(depth))
            .map_err(|_| StegoError::ImageTooLarge)?;
        Ok(Self {
            channels: carrier.channels(),
            depth_bits: depth.bits() as u32,
            perm: SlotPermutation::derive(passphrase, capacity),
            cursor: 0,
        })
    }

    /// Total slot capacity in bits.
    pub fn capacity_bits(&self) -> u64 {
        self.perm.len() as u64
    }

    /// Bits consumed so far.
    pub fn bits_read(&self) -> usize {
        self.cursor
    }

    /// Append up to `n` further bits (in permutation order) to `out`.
    /// Returns how many bits were actually read; short only when the
    /// carrier's capacity is exhausted.
    pub fn read_into(&mut self, n: usize, out: &mut Vec<u8>) -> usize {
        let n = n.min(self.perm.len() - self.cursor);
        out.reserve(n);
        for _ in 0..n {
            let slot = self.perm.slot(self.cursor);
            let channel = (slot / self.depth_bits) as usize;
            let offset = slot % self.depth_bits;
            out.push((self.channels[channel] >> offset) & 1);
            self.cursor += 1;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = SlotPermutation::derive(b"pass", 300);
        let b = SlotPermutation::derive(b"pass", 300);
        assert_eq!(a.slots, b.slots);
    }

    #[test]
    fn different_passphrases_differ() {
        let a = SlotPermutation::derive(b"pass1", 1024);
        let b = SlotPermutation::derive(b"pass2", 1024);
        assert_ne!(a.slots, b.slots);
    }

    #[test]
    fn is_a_bijection() {
        let perm = SlotPermutation::derive(b"bijective", 999);
        let mut slots = perm.slots.clone();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), 999);
        assert_eq!(slots[0], 0);
        assert_eq!(slots[998], 998);
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(SlotPermutation::derive(b"k", 0).len(), 0);
        assert!(SlotPermutation::derive(b"k", 0).is_empty());
        let one = SlotPermutation::derive(b"k", 1);
        assert_eq!(one.slot(0), 0);
    }

    #[test]
    fn reader_growth_matches_single_read() {
        let carrier = RgbCarrier::new(8, 8, (0..8 * 8 * 3).map(|i| i as u8).collect()).unwrap();
        let depth = BitDepth::default();

        let mut grown = Vec::new();
        let mut reader = SlotReader::new(&carrier, b"k", depth).unwrap();
        assert_eq!(reader.read_into(40, &mut grown), 40);
        assert_eq!(reader.read_into(56, &mut grown), 56);
        assert_eq!(reader.bits_read(), 96);

        let mut whole = Vec::new();
        let mut fresh = SlotReader::new(&carrier, b"k", depth).unwrap();
        fresh.read_into(96, &mut whole);
        assert_eq!(grown, whole);
    }

    #[test]
    fn reader_stops_at_capacity() {
        let carrier = RgbCarrier::new(2, 2, vec![0xFF; 12]).unwrap();
        let mut reader = SlotReader::new(&carrier, b"k", BitDepth::default()).unwrap();
        assert_eq!(reader.capacity_bits(), 12);
        let mut bits = Vec::new();
        assert_eq!(reader.read_into(1000, &mut bits), 12);
        assert_eq!(reader.read_into(1, &mut bits), 0);
        assert_eq!(bits, vec![1; 12]);
    }

    #[test]
    fn reader_depth_addresses_low_bits() {
        // Channel bytes 0b110: at depth 3, slots cover bits 0..3 of each
        // byte, so the multiset of read bits is {0,1,1} per channel.
        let carrier = RgbCarrier::new(1, 1, vec![0b110; 3]).unwrap();
        let depth = BitDepth::new(3).unwrap();
        let mut reader = SlotReader::new(&carrier, b"k", depth).unwrap();
        let mut bits = Vec::new();
        assert_eq!(reader.read_into(9, &mut bits), 9);
        assert_eq!(bits.iter().filter(|&&b| b == 1).count(), 6);
    }
}
