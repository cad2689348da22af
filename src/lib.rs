// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! # pixelveil
//!
//! Keyed-permutation LSB steganography for raster images. A payload (UTF-8
//! text or an embedded binary file) is framed, XOR-masked with a
//! passphrase-derived keystream, and scattered across the low-order bits of
//! the carrier's RGB channels in an order determined by a passphrase-keyed
//! permutation. Extraction replays the same permutation and parses the
//! self-describing header progressively, reading only as many bits as the
//! header declares.
//!
//! The masking is a stream cipher keyed by a SHA-256 digest of the
//! passphrase feeding a ChaCha20 generator. It is best-effort obfuscation,
//! not authenticated encryption: a wrong passphrase is indistinguishable
//! from a corrupt or non-stego carrier, and no integrity protection is
//! claimed. Output carriers must be saved losslessly (`save_png`) — any
//! lossy re-encoding destroys the embedded bits.
//!
//! # Quick start
//!
//! ```rust
//! use pixelveil::{embed_payload, extract_payload, BitDepth, Payload, RgbCarrier};
//!
//! let mut carrier = RgbCarrier::new(64, 64, vec![127; 64 * 64 * 3]).unwrap();
//! let payload = Payload::text("meet at dawn");
//! embed_payload(&mut carrier, &payload, b"passphrase", BitDepth::default()).unwrap();
//!
//! let recovered = extract_payload(&carrier, b"passphrase", BitDepth::default()).unwrap();
//! assert_eq!(recovered, payload);
//! ```

pub mod carrier;
pub mod stego;

pub use carrier::RgbCarrier;
pub use stego::capacity::{capacity_bits, BitDepth};
pub use stego::embed::embed_payload;
pub use stego::extract::extract_payload;
pub use stego::payload::Payload;
pub use stego::StegoError;
pub use stego::{MAX_DIMENSION, MAX_PIXELS};
