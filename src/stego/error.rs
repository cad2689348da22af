// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! Error types for the steganography codec.
//!
//! [`StegoError`] covers all failure modes from carrier loading through
//! embedding and progressive extraction. Every variant is terminal for the
//! current operation; nothing is retried internally. Note that a wrong
//! passphrase and a corrupt or non-stego carrier produce the same errors
//! ([`HeaderUnreadable`](StegoError::HeaderUnreadable),
//! [`UnknownTypeTag`](StegoError::UnknownTypeTag),
//! [`DeclaredSizeExceedsCapacity`](StegoError::DeclaredSizeExceedsCapacity))
//! — an inherent property of unauthenticated XOR masking.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// Bits-per-channel depth outside the supported 1–3 range.
    InvalidBitDepth(u8),
    /// The carrier dimensions exceed the maximum allowed (8192px / 16MP).
    ImageTooLarge,
    /// The channel buffer length does not match width × height × 3.
    CarrierSizeMismatch { expected: usize, actual: usize },
    /// The payload needs more bits than the carrier holds at this depth.
    /// Reported before any carrier mutation.
    CapacityExceeded { available_bits: u64, required_bits: u64 },
    /// The payload body length does not fit the frame's u32 length field.
    PayloadTooLarge(usize),
    /// The binary payload's extension exceeds 255 bytes.
    ExtensionTooLong(usize),
    /// The binary payload's extension is not ASCII.
    ExtensionNotAscii,
    /// Fewer than 7 decrypted bytes available to parse the frame header —
    /// typically a wrong passphrase or a non-stego carrier.
    HeaderUnreadable { available_bytes: usize },
    /// The decrypted type tag matches neither recognized payload variant —
    /// typically a wrong passphrase.
    UnknownTypeTag([u8; 3]),
    /// The header's declared total size exceeds the carrier's capacity —
    /// corruption or a wrong passphrase; a correct passphrase against a
    /// genuinely embedded payload can never trigger this.
    DeclaredSizeExceedsCapacity { declared_bits: u64, capacity_bits: u64 },
    /// The carrier image could not be decoded or encoded.
    Image(image::ImageError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitDepth(bits) => {
                write!(f, "bit depth {bits} out of range (1-3)")
            }
            Self::ImageTooLarge => write!(f, "carrier too large (max 8192px / 16MP)"),
            Self::CarrierSizeMismatch { expected, actual } => {
                write!(f, "channel buffer is {actual} bytes, expected {expected}")
            }
            Self::CapacityExceeded { available_bits, required_bits } => {
                write!(
                    f,
                    "payload needs {required_bits} bits but carrier holds {available_bits}"
                )
            }
            Self::PayloadTooLarge(len) => {
                write!(f, "payload body of {len} bytes exceeds the u32 length field")
            }
            Self::ExtensionTooLong(len) => {
                write!(f, "extension of {len} bytes exceeds 255")
            }
            Self::ExtensionNotAscii => write!(f, "extension is not ASCII"),
            Self::HeaderUnreadable { available_bytes } => {
                write!(
                    f,
                    "only {available_bytes} header bytes available, need 7 \
                     (wrong passphrase or no embedded payload?)"
                )
            }
            Self::UnknownTypeTag(tag) => {
                write!(f, "unknown payload type tag {tag:02x?} (wrong passphrase?)")
            }
            Self::DeclaredSizeExceedsCapacity { declared_bits, capacity_bits } => {
                write!(
                    f,
                    "header declares {declared_bits} bits but carrier capacity is \
                     {capacity_bits} (corrupt carrier or wrong passphrase?)"
                )
            }
            Self::Image(e) => write!(f, "carrier image error: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}
