// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! The payload record: what gets hidden.
//!
//! Two variants exist on the wire (see [`frame`](crate::stego::frame)):
//! UTF-8 text, and an opaque binary file tagged with an ASCII extension so
//! the extracting side knows what to save it as.

use std::path::Path;

/// A payload to embed or a payload recovered from a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A UTF-8 text message.
    Text(String),
    /// An embedded file: opaque bytes plus an ASCII extension (≤ 255
    /// bytes, no leading dot) used to name the recovered file.
    Binary { extension: String, bytes: Vec<u8> },
}

impl Payload {
    /// Build a text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Build a binary payload, inferring the extension from `filename`.
    pub fn binary_from_file(filename: &str, bytes: Vec<u8>) -> Self {
        Self::Binary { extension: infer_extension(filename), bytes }
    }

    /// Serialized body length in bytes (text bytes or file bytes).
    pub fn body_len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary { bytes, .. } => bytes.len(),
        }
    }
}

/// Infer a wire extension from a filename: final extension, lowercased,
/// `"raw"` when the name has none.
pub fn infer_extension(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext.is_empty() {
        "raw".to_string()
    } else {
        ext
    }
}
