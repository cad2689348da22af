// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! Determinism invariants.
//!
//! Encode and decode agree only because the permutation and keystream are
//! pure functions of the passphrase. These tests pin that property at the
//! whole-pipeline level; the unit tests in `stego::permute` and
//! `stego::keystream` cover the leaf derivations.

use pixelveil::stego::permute::SlotPermutation;
use pixelveil::{embed_payload, extract_payload, BitDepth, Payload, RgbCarrier};

fn gradient_carrier(width: u32, height: u32) -> RgbCarrier {
    let channels = (0..width as usize * height as usize * 3)
        .map(|i| (i * 31 % 256) as u8)
        .collect();
    RgbCarrier::new(width, height, channels).unwrap()
}

#[test]
fn identical_inputs_produce_identical_stego() {
    let payload = Payload::text("bit for bit");
    let mut a = gradient_carrier(24, 24);
    let mut b = gradient_carrier(24, 24);
    embed_payload(&mut a, &payload, b"same", BitDepth::default()).unwrap();
    embed_payload(&mut b, &payload, b"same", BitDepth::default()).unwrap();
    assert_eq!(a.channels(), b.channels());
}

#[test]
fn different_passphrases_scatter_differently() {
    let payload = Payload::text("bit for bit");
    let mut a = gradient_carrier(24, 24);
    let mut b = gradient_carrier(24, 24);
    embed_payload(&mut a, &payload, b"pass-a", BitDepth::default()).unwrap();
    embed_payload(&mut b, &payload, b"pass-b", BitDepth::default()).unwrap();
    assert_ne!(a.channels(), b.channels());
}

#[test]
fn permutation_rederivation_is_stable_across_capacities() {
    // The same (passphrase, capacity) pair must always yield the same
    // bijection; different capacities are unrelated orderings.
    for capacity in [96u32, 300, 1200, 4096] {
        let a = SlotPermutation::derive(b"stable", capacity);
        let b = SlotPermutation::derive(b"stable", capacity);
        assert_eq!(a.len(), capacity as usize);
        for i in 0..a.len() {
            assert_eq!(a.slot(i), b.slot(i), "mismatch at index {i}, capacity {capacity}");
        }
    }
}

#[test]
fn extraction_is_repeatable() {
    let payload = Payload::Binary { extension: "bin".into(), bytes: vec![42; 64] };
    let mut carrier = gradient_carrier(32, 32);
    embed_payload(&mut carrier, &payload, b"rep", BitDepth::default()).unwrap();

    let first = extract_payload(&carrier, b"rep", BitDepth::default()).unwrap();
    let second = extract_payload(&carrier, b"rep", BitDepth::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, payload);
}

#[test]
fn reembedding_same_payload_is_idempotent() {
    // Embedding writes every frame bit explicitly, so embedding the same
    // payload into an already-embedded carrier changes nothing.
    let payload = Payload::text("idempotent");
    let mut carrier = gradient_carrier(24, 24);
    embed_payload(&mut carrier, &payload, b"k", BitDepth::default()).unwrap();
    let once = carrier.channels().to_vec();
    embed_payload(&mut carrier, &payload, b"k", BitDepth::default()).unwrap();
    assert_eq!(carrier.channels(), &once[..]);
}
