//! Compressed mip levels

use crate::{
    error::LayoutError,
    format::{compressed_image_size, CompressedFormat, SurfaceFormat},
};

use serde::{Deserialize, Serialize};

/// The compression applied to a texture by the build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionScheme {
    None,
    Pvrtc2Bpp,
    Pvrtc4Bpp,
}

impl CompressionScheme {
    pub fn compressed_format(self) -> Option<CompressedFormat> {
        match self {
            CompressionScheme::None => None,
            CompressionScheme::Pvrtc2Bpp => Some(CompressedFormat::Pvrtc2Bpp),
            CompressionScheme::Pvrtc4Bpp => Some(CompressedFormat::Pvrtc4Bpp),
        }
    }

    /// The asset format blocks of this scheme are written as.
    pub fn surface_format(self) -> SurfaceFormat {
        match self {
            CompressionScheme::None => SurfaceFormat::Color,
            CompressionScheme::Pvrtc2Bpp => SurfaceFormat::RgbaPvrtc2Bpp,
            CompressionScheme::Pvrtc4Bpp => SurfaceFormat::RgbaPvrtc4Bpp,
        }
    }

    pub fn is_four_bpp(self) -> bool {
        self == CompressionScheme::Pvrtc4Bpp
    }

    /// How many bytes a level of the given size takes up in this scheme.
    /// Compressed sizes only depend on the width, as compressed levels are always square.
    pub fn level_size(self, width: u32, height: u32) -> usize {
        match self.compressed_format() {
            Some(f) => compressed_image_size(f, width),
            None => width as usize * height as usize * 4,
        }
    }
}

/// One mip level's worth of compressed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBlock {
    width: u32,
    height: u32,
    scheme: CompressionScheme,
    bytes: Box<[u8]>,
}

impl CompressedBlock {
    /// Wrap the given bytes, checking they're the size `scheme` says they should be.
    pub fn new(
        width: u32,
        height: u32,
        scheme: CompressionScheme,
        bytes: Vec<u8>,
    ) -> Result<Self, LayoutError> {
        let expected = scheme.level_size(width, height);
        if bytes.len() != expected {
            return Err(LayoutError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(CompressedBlock {
            width,
            height,
            scheme,
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scheme(&self) -> CompressionScheme {
        self.scheme
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
