#![allow(dead_code)]

use stockton_texture::{
    compressed_image_size, mips::level_extent, BitmapBuffer, CompressedFormat, PixelFormat,
};
use stockton_texture_build::{CompressRequest, Compressor, RawCompressed};

use anyhow::Result;

/// What a compressor was called with.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub premultiplied: bool,
    pub four_bpp: bool,
    pub pixels: Vec<u8>,
}

/// Produces correctly sized levels without actually compressing anything.
/// Every byte of level `n` is `n`.
#[derive(Debug, Default)]
pub struct PatternCompressor {
    pub calls: Vec<Call>,
}

impl Compressor for PatternCompressor {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed> {
        self.calls.push(Call {
            width: request.width,
            height: request.height,
            mip_levels: request.mip_levels,
            premultiplied: request.premultiplied,
            four_bpp: request.four_bpp,
            pixels: request.pixels.to_vec(),
        });

        let format = if request.four_bpp {
            CompressedFormat::Pvrtc4Bpp
        } else {
            CompressedFormat::Pvrtc2Bpp
        };

        let mut raw = RawCompressed {
            data: Vec::new(),
            level_sizes: Vec::new(),
        };
        for level in 0..request.mip_levels {
            let size = compressed_image_size(format, level_extent(request.width, level));
            raw.data.extend(std::iter::repeat(level as u8).take(size));
            raw.level_sizes.push(size as u32);
        }

        Ok(raw)
    }
}

/// Returns a size table one entry short.
pub struct ShortTableCompressor;

impl Compressor for ShortTableCompressor {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed> {
        let mut raw = PatternCompressor::default().compress(request)?;
        let last = raw.level_sizes.pop().unwrap_or(0);
        raw.data.truncate(raw.data.len() - last as usize);

        Ok(raw)
    }
}

/// An 8 bit RGBA image filled with one colour.
pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> BitmapBuffer {
    let bytes = pixel
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect();

    BitmapBuffer::new(width, height, PixelFormat::Rgba8, bytes).unwrap()
}
