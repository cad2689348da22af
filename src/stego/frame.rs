// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! Payload frame construction and progressive parsing.
//!
//! The frame is the byte container that wraps a payload before it is
//! scattered into the carrier. All integers are big-endian; the whole
//! frame — header included — is XOR-masked with the passphrase keystream
//! after serialization:
//!
//! ```text
//! [3 bytes] type tag: "TXT" or "IMG" (ASCII)
//! [4 bytes] body length N (u32)
//! [1 byte ] extension length E        (IMG only)
//! [E bytes] extension (ASCII)         (IMG only)
//! [N bytes] body: UTF-8 text or file bytes
//! ```
//!
//! Because the length fields are themselves masked, a decoder cannot know
//! the frame size up front. [`parse_frame_partial`] therefore accepts a
//! partial buffer and either returns the parsed payload or reports the
//! total byte count it needs before it can continue — the extractor grows
//! its bit buffer and calls again.

use crate::stego::error::StegoError;
use crate::stego::keystream;
use crate::stego::payload::Payload;

/// Type tag for a text payload.
pub const TAG_TEXT: [u8; 3] = *b"TXT";
/// Type tag for an embedded binary file.
pub const TAG_BINARY: [u8; 3] = *b"IMG";

/// Fixed header: tag (3) + body length (4). A text frame's entire header.
pub const TEXT_HEADER_LEN: usize = 7;
/// Fixed prefix of a binary frame: tag (3) + body length (4) + ext length (1).
pub const BINARY_FIXED_LEN: usize = 8;
/// Worst-case header: binary frame with a 255-byte extension.
pub const MAX_HEADER_LEN: usize = BINARY_FIXED_LEN + 255;

/// Outcome of a partial parse attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameParse {
    /// The buffer held a complete frame.
    Complete {
        payload: Payload,
        /// Total frame length in bytes; anything past it is padding.
        frame_len: usize,
    },
    /// The buffer is too short: at least this many total bytes are needed
    /// before parsing can continue. Counted in bytes, as a `u64` because
    /// the demand comes from an untrusted 32-bit length field.
    NeedAtLeast(u64),
}

/// Serialize a payload into a frame and mask it with the passphrase.
///
/// # Errors
/// - [`StegoError::PayloadTooLarge`] if the body exceeds the u32 length field.
/// - [`StegoError::ExtensionTooLong`] / [`StegoError::ExtensionNotAscii`]
///   for a binary payload whose extension violates the wire format.
pub fn build_frame(payload: &Payload, passphrase: &[u8]) -> Result<Vec<u8>, StegoError> {
    let clear = serialize_frame(payload)?;
    Ok(keystream::xor_mask(&clear, passphrase))
}

fn serialize_frame(payload: &Payload) -> Result<Vec<u8>, StegoError> {
    let body_len = u32::try_from(payload.body_len())
        .map_err(|_| StegoError::PayloadTooLarge(payload.body_len()))?;

    match payload {
        Payload::Text(text) => {
            let mut frame = Vec::with_capacity(TEXT_HEADER_LEN + text.len());
            frame.extend_from_slice(&TAG_TEXT);
            frame.extend_from_slice(&body_len.to_be_bytes());
            frame.extend_from_slice(text.as_bytes());
            Ok(frame)
        }
        Payload::Binary { extension, bytes } => {
            if !extension.is_ascii() {
                return Err(StegoError::ExtensionNotAscii);
            }
            let ext = extension.as_bytes();
            if ext.len() > 255 {
                return Err(StegoError::ExtensionTooLong(ext.len()));
            }
            let mut frame = Vec::with_capacity(BINARY_FIXED_LEN + ext.len() + bytes.len());
            frame.extend_from_slice(&TAG_BINARY);
            frame.extend_from_slice(&body_len.to_be_bytes());
            frame.push(ext.len() as u8);
            frame.extend_from_slice(ext);
            frame.extend_from_slice(bytes);
            Ok(frame)
        }
    }
}

/// Attempt to parse a masked, possibly partial frame buffer.
///
/// Unmasks the buffer (keystream prefixes are stable, so a partial buffer
/// unmasks to a prefix of the clear frame) and walks the header. The
/// returned [`FrameParse::NeedAtLeast`] demands are monotonic: 7 bytes to
/// read tag and body length, 8 for a binary frame's extension length, then
/// the full header + body span.
///
/// # Errors
/// [`StegoError::UnknownTypeTag`] if the decrypted tag matches neither
/// variant — with a masked frame this is the typical wrong-passphrase
/// signal.
pub fn parse_frame_partial(masked: &[u8], passphrase: &[u8]) -> Result<FrameParse, StegoError> {
    if masked.len() < TEXT_HEADER_LEN {
        return Ok(FrameParse::NeedAtLeast(TEXT_HEADER_LEN as u64));
    }
    let clear = keystream::xor_mask(masked, passphrase);

    let tag = [clear[0], clear[1], clear[2]];
    let body_len = u32::from_be_bytes([clear[3], clear[4], clear[5], clear[6]]) as u64;

    if tag == TAG_TEXT {
        let total = TEXT_HEADER_LEN as u64 + body_len;
        if (clear.len() as u64) < total {
            return Ok(FrameParse::NeedAtLeast(total));
        }
        let total = total as usize;
        let body = &clear[TEXT_HEADER_LEN..total];
        return Ok(FrameParse::Complete {
            payload: Payload::Text(decode_text(body)),
            frame_len: total,
        });
    }

    if tag == TAG_BINARY {
        if clear.len() < BINARY_FIXED_LEN {
            return Ok(FrameParse::NeedAtLeast(BINARY_FIXED_LEN as u64));
        }
        let ext_len = clear[7] as usize;
        let header_len = BINARY_FIXED_LEN + ext_len;
        let total = header_len as u64 + body_len;
        if (clear.len() as u64) < total {
            return Ok(FrameParse::NeedAtLeast(total));
        }
        let total = total as usize;
        let extension = decode_extension(&clear[BINARY_FIXED_LEN..header_len]);
        let bytes = clear[header_len..total].to_vec();
        return Ok(FrameParse::Complete {
            payload: Payload::Binary { extension, bytes },
            frame_len: total,
        });
    }

    Err(StegoError::UnknownTypeTag(tag))
}

/// Decode body bytes as UTF-8, falling back to a byte-preserving Latin-1
/// read rather than failing on invalid sequences.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Best-effort ASCII decode of the extension: non-ASCII bytes are dropped.
fn decode_extension(bytes: &[u8]) -> String {
    bytes.iter().filter(|b| b.is_ascii()).map(|&b| b as char).collect()
}

/// Unpack bytes into a bit sequence, least-significant bit of each byte
/// first. This is the order in which frame bits map onto permuted slots.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for pos in 0..8 {
            bits.push((byte >> pos) & 1);
        }
    }
    bits
}

/// Pack a bit sequence (LSB first per byte) back into bytes.
/// A trailing partial group of fewer than 8 bits is dropped.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << i;
        }
        bytes.push(byte);
    }
    bytes
}
