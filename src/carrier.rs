// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/pixelveil

//! The RGB carrier: the pixel buffer whose low-order bits host the payload.
//!
//! A carrier is `width × height` pixels of 3 channel bytes each, row-major
//! and channel-minor. Sources with other layouts (alpha, grayscale,
//! palettes) are converted to RGB8 on load; the alpha channel is dropped.
//! Stego output is saved as PNG only — a lossy format would destroy the
//! embedded LSBs.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::stego::capacity::{self, BitDepth};
use crate::stego::error::StegoError;
use crate::stego::validate_carrier_dimensions;

/// An owned RGB channel buffer with validated dimensions.
#[derive(Debug)]
pub struct RgbCarrier {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl RgbCarrier {
    /// Build a carrier from raw channel bytes (`len == width × height × 3`).
    ///
    /// # Errors
    /// - [`StegoError::ImageTooLarge`] for dimensions over 8192px / 16MP.
    /// - [`StegoError::CarrierSizeMismatch`] if the buffer length is wrong.
    pub fn new(width: u32, height: u32, channels: Vec<u8>) -> Result<Self, StegoError> {
        validate_carrier_dimensions(width, height)?;
        let expected = width as usize * height as usize * 3;
        if channels.len() != expected {
            return Err(StegoError::CarrierSizeMismatch { expected, actual: channels.len() });
        }
        Ok(Self { width, height, channels })
    }

    /// Convert a decoded image to a carrier, dropping any alpha channel.
    pub fn from_image(image: &DynamicImage) -> Result<Self, StegoError> {
        let rgb = image.to_rgb8();
        Self::new(rgb.width(), rgb.height(), rgb.into_raw())
    }

    /// Load a carrier from any raster file the `image` crate understands.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let image = image::open(path)?;
        Self::from_image(&image)
    }

    /// Reassemble the channel buffer into an image.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.channels.clone())
            .expect("channel buffer matches dimensions")
    }

    /// Save as PNG regardless of the path's extension. PNG is lossless;
    /// the embedded bits survive the round-trip to disk.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The channel bytes, row-major and channel-minor (R,G,B per pixel).
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [u8] {
        &mut self.channels
    }

    /// Payload bit capacity at the given depth.
    pub fn capacity_bits(&self, depth: BitDepth) -> u64 {
        capacity::capacity_bits(self.width, self.height, depth)
    }
}
