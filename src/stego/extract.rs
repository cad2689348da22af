// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! The progressive extractor: the decode path.
//!
//! The frame's length fields are masked, so the number of bits to read
//! cannot be known before some header bytes have been read and unmasked.
//! Extraction runs a three-state machine:
//!
//! - **Bootstrap**: read a fixed prefix of permuted bit-slots — generous
//!   enough ([`BOOTSTRAP_PREFIX_BYTES`]) to cover the worst-case header
//!   (3+4+1+255 bytes) in one pass, bounded by [`MAX_BOOTSTRAP_BITS`] and
//!   by the carrier's capacity. Fails with `HeaderUnreadable` if fewer
//!   than 7 bytes come out.
//! - **Header**: let the frame parser inspect the unmasked prefix; grow
//!   the bit buffer when it reports a larger demand (a binary frame's
//!   extension-length byte, then the extension itself).
//! - **Body**: grow to header + declared body length, failing with
//!   `DeclaredSizeExceedsCapacity` when the demand cannot fit the carrier.
//!
//! Every growth step reads further bits strictly in increasing permutation
//! order via [`SlotReader`] — the permutation is derived once and consumed
//! lazily, never regenerated or rewound.

use crate::carrier::RgbCarrier;
use crate::stego::capacity::BitDepth;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, FrameParse};
use crate::stego::payload::Payload;
use crate::stego::permute::SlotReader;

/// Bootstrap prefix in bytes. Exceeds the worst-case header
/// ([`frame::MAX_HEADER_LEN`] = 263 bytes) so header parsing normally
/// completes without a growth round.
pub const BOOTSTRAP_PREFIX_BYTES: usize = 512;

/// Hard bound on speculative reads, so a corrupt carrier cannot force
/// unbounded buffering during header bootstrap.
pub const MAX_BOOTSTRAP_BITS: u64 = 8 * 1024 * 1024;

/// Extract the payload embedded in a carrier.
///
/// Replays the permutation the embedder used for this (passphrase, depth)
/// and parses the self-describing frame progressively.
///
/// # Errors
/// - [`StegoError::HeaderUnreadable`] if the carrier cannot supply the
///   7–8 byte fixed header region.
/// - [`StegoError::UnknownTypeTag`] if the decrypted tag is unrecognized.
/// - [`StegoError::DeclaredSizeExceedsCapacity`] if the header's declared
///   span exceeds the carrier's capacity.
///
/// A wrong passphrase surfaces as one of the above, never as silently
/// wrong data (overwhelming-probability guarantee, not absolute).
pub fn extract_payload(
    carrier: &RgbCarrier,
    passphrase: &[u8],
    depth: BitDepth,
) -> Result<Payload, StegoError> {
    let mut reader = SlotReader::new(carrier, passphrase, depth)?;
    let capacity = reader.capacity_bits();

    // Bootstrap.
    let bootstrap = ((BOOTSTRAP_PREFIX_BYTES * 8) as u64)
        .min(MAX_BOOTSTRAP_BITS)
        .min(capacity) as usize;
    let mut bits = Vec::new();
    reader.read_into(bootstrap, &mut bits);
    let mut masked = frame::bits_to_bytes(&bits);
    if masked.len() < frame::TEXT_HEADER_LEN {
        return Err(StegoError::HeaderUnreadable { available_bytes: masked.len() });
    }

    // Header and body: parse, grow, repeat. Demands are monotonic and
    // bounded by capacity, so this terminates.
    loop {
        match frame::parse_frame_partial(&masked, passphrase)? {
            FrameParse::Complete { payload, .. } => return Ok(payload),
            FrameParse::NeedAtLeast(total_bytes) => {
                let need_bits = total_bytes * 8;
                if need_bits > capacity {
                    if total_bytes <= frame::BINARY_FIXED_LEN as u64 {
                        return Err(StegoError::HeaderUnreadable {
                            available_bytes: masked.len(),
                        });
                    }
                    return Err(StegoError::DeclaredSizeExceedsCapacity {
                        declared_bits: need_bits,
                        capacity_bits: capacity,
                    });
                }
                let target = need_bits as usize;
                if target > bits.len() {
                    reader.read_into(target - bits.len(), &mut bits);
                }
                masked = frame::bits_to_bytes(&bits);
            }
        }
    }
}
