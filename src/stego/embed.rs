// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! The permutation embedder: the encode path.
//!
//! Pipeline: payload → frame (masked) → bit sequence (LSB of each byte
//! first) → capacity check → keyed permutation → in-place LSB writes.
//! Logical bit `i` lands in slot `permutation[i]`, which addresses
//! channel byte `slot / depth` at bit position `slot % depth` (0 = LSB).
//! Channels not addressed by any payload bit, and all bits above the
//! selected depth, keep their original values.

use crate::carrier::RgbCarrier;
use crate::stego::capacity::BitDepth;
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::payload::Payload;
use crate::stego::permute::SlotPermutation;

/// Embed a payload into the carrier in place.
///
/// Deterministic given (carrier, passphrase, payload, depth). The carrier
/// is only mutated after the capacity check passes, so a failed embed
/// leaves it untouched.
///
/// # Errors
/// - [`StegoError::CapacityExceeded`] if the frame needs more bits than
///   the carrier holds at this depth, reporting both figures.
/// - Frame serialization errors for oversized bodies or invalid extensions.
pub fn embed_payload(
    carrier: &mut RgbCarrier,
    payload: &Payload,
    passphrase: &[u8],
    depth: BitDepth,
) -> Result<(), StegoError> {
    let masked = frame::build_frame(payload, passphrase)?;
    let bits = frame::bytes_to_bits(&masked);

    let capacity = carrier.capacity_bits(depth);
    if bits.len() as u64 > capacity {
        return Err(StegoError::CapacityExceeded {
            available_bits: capacity,
            required_bits: bits.len() as u64,
        });
    }

    let capacity = u32::try_from(capacity).map_err(|_| StegoError::ImageTooLarge)?;
    let perm = SlotPermutation::derive(passphrase, capacity);
    let depth_bits = depth.bits() as u32;

    let channels = carrier.channels_mut();
    for (i, &bit) in bits.iter().enumerate() {
        let slot = perm.slot(i);
        let channel = (slot / depth_bits) as usize;
        let offset = (slot % depth_bits) as u8;
        channels[channel] = set_bit(channels[channel], offset, bit);
    }
    Ok(())
}

/// Set bit `position` (0 = LSB) of `byte` to `value`, leaving the rest
/// untouched.
fn set_bit(byte: u8, position: u8, value: u8) -> u8 {
    if value != 0 {
        byte | (1 << position)
    } else {
        byte & !(1 << position)
    }
}
