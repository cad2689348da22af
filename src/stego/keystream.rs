// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! Passphrase-derived keystream and XOR stream cipher.
//!
//! The passphrase is digested with SHA-256 into a 32-byte seed; the seed
//! drives a fresh ChaCha20 generator per derivation call, so there is no
//! shared generator state across embed/extract invocations. The generator
//! is a true byte stream: `keystream(p, L)` is a prefix of
//! `keystream(p, L')` for `L < L'`, which lets the progressive extractor
//! re-unmask a grown buffer from offset 0.
//!
//! Security rests entirely on passphrase strength and generator quality.
//! This is best-effort obfuscation, not a confidentiality guarantee: the
//! keystream carries no authentication, and the same digest also seeds the
//! slot permutation.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Digest a passphrase into a 32-byte generator seed.
///
/// Deterministic: both encoder and decoder derive the identical seed from
/// the passphrase alone.
pub fn derive_seed(passphrase: &[u8]) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(Sha256::digest(passphrase).into())
}

/// Draw `len` keystream bytes for a passphrase.
pub fn keystream(passphrase: &[u8], len: usize) -> Vec<u8> {
    let seed = derive_seed(passphrase);
    let mut rng = ChaCha20Rng::from_seed(*seed);
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// XOR `data` against the passphrase keystream.
///
/// Involution: applying twice with the same passphrase recovers the input.
/// An empty passphrase is the identity, so encode and decode can call the
/// same function unconditionally.
pub fn xor_mask(data: &[u8], passphrase: &[u8]) -> Vec<u8> {
    if passphrase.is_empty() {
        return data.to_vec();
    }
    let ks = keystream(passphrase, data.len());
    data.iter().zip(ks.iter()).map(|(d, k)| d ^ k).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_deterministic() {
        assert_eq!(*derive_seed(b"mypass"), *derive_seed(b"mypass"));
    }

    #[test]
    fn seed_differs_by_passphrase() {
        assert_ne!(*derive_seed(b"pass1"), *derive_seed(b"pass2"));
    }

    #[test]
    fn keystream_exact_length() {
        for len in [0, 1, 7, 64, 1000] {
            assert_eq!(keystream(b"k", len).len(), len);
        }
    }

    #[test]
    fn keystream_deterministic() {
        assert_eq!(keystream(b"k", 128), keystream(b"k", 128));
    }

    #[test]
    fn keystream_is_prefix_stable() {
        // The extractor unmasks grown buffers from offset 0 and relies on
        // shorter derivations being prefixes of longer ones.
        let short = keystream(b"k", 16);
        let long = keystream(b"k", 256);
        assert_eq!(short, long[..16]);
    }

    #[test]
    fn keystream_differs_by_passphrase() {
        assert_ne!(keystream(b"a", 64), keystream(b"b", 64));
    }

    #[test]
    fn mask_involution() {
        let data = b"arbitrary payload bytes \x00\xff\x7f";
        let masked = xor_mask(data, b"secret");
        assert_ne!(masked, data.to_vec());
        assert_eq!(xor_mask(&masked, b"secret"), data.to_vec());
    }

    #[test]
    fn empty_passphrase_is_identity() {
        let data = b"unmasked";
        assert_eq!(xor_mask(data, b""), data.to_vec());
    }

    #[test]
    fn mask_preserves_length() {
        assert_eq!(xor_mask(&[0u8; 123], b"k").len(), 123);
        assert_eq!(xor_mask(&[], b"k").len(), 0);
    }
}
