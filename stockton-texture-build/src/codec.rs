//! The boundary with external block compressors.
//!
//! Compressors hand back one contiguous buffer and a table of how big each mip level in it is.
//! [`compress`] splits that back up into one [`CompressedBlock`] per level.

use crate::error::CodecError;

use stockton_texture::{mips::level_extent, CompressedBlock, CompressionScheme};

use anyhow::{Context, Result};
use log::debug;

/// Everything a compressor is given.
#[derive(Debug, Clone, Copy)]
pub struct CompressRequest<'a> {
    /// Level 0, as 8 bit RGBA
    pub pixels: &'a [u8],
    pub height: u32,
    pub width: u32,

    /// How many levels to produce. The compressor generates levels past 0 itself.
    pub mip_levels: u32,

    /// Whether `pixels` has had its alpha premultiplied
    pub premultiplied: bool,

    /// 4 bits per pixel if true, 2 if false
    pub four_bpp: bool,
}

/// What a compressor hands back: every level back to back, and the size of each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompressed {
    pub data: Vec<u8>,
    pub level_sizes: Vec<u32>,
}

/// Something that can block compress images.
pub trait Compressor {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed>;
}

impl<C: Compressor + ?Sized> Compressor for &mut C {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed> {
        (**self).compress(request)
    }
}

impl<C: Compressor + ?Sized> Compressor for Box<C> {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed> {
        (**self).compress(request)
    }
}

/// Compress one face with the given compressor, returning one block per mip level.
pub fn compress<C: Compressor + ?Sized>(
    compressor: &mut C,
    pixels: &[u8],
    height: u32,
    width: u32,
    mip_levels: u32,
    premultiplied: bool,
    scheme: CompressionScheme,
) -> Result<Vec<CompressedBlock>> {
    if scheme.compressed_format().is_none() {
        return Err(CodecError::NoScheme(scheme).into());
    }

    let raw = compressor
        .compress(&CompressRequest {
            pixels,
            height,
            width,
            mip_levels,
            premultiplied,
            four_bpp: scheme.is_four_bpp(),
        })
        .context("Error running compressor")?;

    Ok(split_levels(raw, width, height, mip_levels, scheme)?)
}

/// Split a compressor's output into its levels. The size table must have exactly one entry per
/// level, the entries must add up to the length of the data, and each level must be the size its
/// scheme says it should be.
pub fn split_levels(
    raw: RawCompressed,
    width: u32,
    height: u32,
    mip_levels: u32,
    scheme: CompressionScheme,
) -> Result<Vec<CompressedBlock>, CodecError> {
    let mip_levels = mip_levels as usize;
    if raw.level_sizes.len() != mip_levels {
        return Err(CodecError::SizeTable {
            expected: mip_levels,
            actual: raw.level_sizes.len(),
        });
    }

    let total: usize = raw.level_sizes.iter().map(|s| *s as usize).sum();
    if total != raw.data.len() {
        return Err(CodecError::DataLength {
            expected: total,
            actual: raw.data.len(),
        });
    }

    let mut blocks = Vec::with_capacity(mip_levels);
    let mut offset = 0;
    for (level, size) in raw.level_sizes.iter().enumerate() {
        let size = *size as usize;
        let level_width = level_extent(width, level as u32);
        let level_height = level_extent(height, level as u32);

        let data = raw.data[offset..offset + size].to_vec();
        let block = CompressedBlock::new(level_width, level_height, scheme, data).map_err(|_| {
            CodecError::LevelSize {
                level,
                width: level_width,
                height: level_height,
                scheme,
                expected: scheme.level_size(level_width, level_height),
                actual: size,
            }
        })?;

        debug!(
            "Compressed level {} ({}x{}) is {} bytes",
            level, level_width, level_height, size
        );

        blocks.push(block);
        offset += size;
    }

    Ok(blocks)
}
