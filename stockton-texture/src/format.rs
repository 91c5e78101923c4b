//! Surface formats as they appear in texture assets, and the byte sizes of images in them.

use std::{cmp::max, collections::HashMap, convert::TryFrom};

use hal::format::Format;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// The pixel format of a texture asset.
/// The discriminants are what's stored on disk, so don't change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SurfaceFormat {
    Color = 0,
    Bgr565 = 1,
    Bgra5551 = 2,
    Bgra4444 = 3,
    Dxt1 = 4,
    Dxt3 = 5,
    Dxt5 = 6,
    NormalizedByte2 = 7,
    NormalizedByte4 = 8,
    Rgba1010102 = 9,
    Rg32 = 10,
    Rgba64 = 11,
    Alpha8 = 12,
    Single = 13,
    Vector2 = 14,
    Vector4 = 15,
    HalfSingle = 16,
    HalfVector2 = 17,
    HalfVector4 = 18,
    HdrBlendable = 19,
    RgbPvrtc2Bpp = 50,
    RgbPvrtc4Bpp = 51,
    RgbaPvrtc2Bpp = 52,
    RgbaPvrtc4Bpp = 53,
}

impl SurfaceFormat {
    /// The equivalent HAL format, if there is one.
    /// PVRTC has no HAL equivalent.
    pub fn hal_format(self) -> Option<Format> {
        use SurfaceFormat::*;

        Some(match self {
            Color => Format::Rgba8Unorm,
            Bgr565 => Format::B5g6r5Unorm,
            Bgra5551 => Format::B5g5r5a1Unorm,
            Bgra4444 => Format::Bgra4Unorm,
            Dxt1 => Format::Bc1RgbaUnorm,
            Dxt3 => Format::Bc2Unorm,
            Dxt5 => Format::Bc3Unorm,
            NormalizedByte2 => Format::Rg8Snorm,
            NormalizedByte4 => Format::Rgba8Snorm,
            Rgba1010102 => Format::A2b10g10r10Unorm,
            Rg32 => Format::Rg16Unorm,
            Rgba64 => Format::Rgba16Unorm,
            Alpha8 => Format::R8Unorm,
            Single => Format::R32Sfloat,
            Vector2 => Format::Rg32Sfloat,
            Vector4 => Format::Rgba32Sfloat,
            HalfSingle => Format::R16Sfloat,
            HalfVector2 => Format::Rg16Sfloat,
            HalfVector4 | HdrBlendable => Format::Rgba16Sfloat,
            RgbPvrtc2Bpp | RgbPvrtc4Bpp | RgbaPvrtc2Bpp | RgbaPvrtc4Bpp => return None,
        })
    }

    /// The block compression used by this format, or None if it's stored as plain pixels.
    pub fn compressed(self) -> Option<CompressedFormat> {
        use SurfaceFormat::*;

        match self {
            Dxt1 => Some(CompressedFormat::Bc8),
            Dxt3 | Dxt5 => Some(CompressedFormat::Bc16),
            RgbPvrtc2Bpp | RgbaPvrtc2Bpp => Some(CompressedFormat::Pvrtc2Bpp),
            RgbPvrtc4Bpp | RgbaPvrtc4Bpp => Some(CompressedFormat::Pvrtc4Bpp),
            _ => None,
        }
    }

    pub fn is_compressed(self) -> bool {
        self.compressed().is_some()
    }

    /// Size of a single pixel in bytes, for uncompressed formats.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_compressed() {
            return None;
        }

        self.hal_format()
            .map(|f| f.surface_desc().bits as usize / 8)
    }

    /// The number of bytes needed for a square image with the given edge length.
    pub fn image_size(self, edge: u32) -> usize {
        match self.compressed() {
            Some(c) => compressed_image_size(c, edge),
            None => self.region_size(edge, edge),
        }
    }

    /// The number of bytes needed for a `width` x `height` block of pixels.
    /// Always 0 for compressed formats, which can't be addressed per-pixel.
    pub fn region_size(self, width: u32, height: u32) -> usize {
        self.bytes_per_pixel()
            .map(|bpp| width as usize * height as usize * bpp)
            .unwrap_or(0)
    }
}

impl TryFrom<i32> for SurfaceFormat {
    type Error = AssetError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use SurfaceFormat::*;

        Ok(match value {
            0 => Color,
            1 => Bgr565,
            2 => Bgra5551,
            3 => Bgra4444,
            4 => Dxt1,
            5 => Dxt3,
            6 => Dxt5,
            7 => NormalizedByte2,
            8 => NormalizedByte4,
            9 => Rgba1010102,
            10 => Rg32,
            11 => Rgba64,
            12 => Alpha8,
            13 => Single,
            14 => Vector2,
            15 => Vector4,
            16 => HalfSingle,
            17 => HalfVector2,
            18 => HalfVector4,
            19 => HdrBlendable,
            50 => RgbPvrtc2Bpp,
            51 => RgbPvrtc4Bpp,
            52 => RgbaPvrtc2Bpp,
            53 => RgbaPvrtc4Bpp,
            x => return Err(AssetError::UnknownSurfaceFormat(x)),
        })
    }
}

/// A block compression scheme, grouped by how its size is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressedFormat {
    /// PVRTC, 2 bits per pixel
    Pvrtc2Bpp,

    /// PVRTC, 4 bits per pixel
    Pvrtc4Bpp,

    /// 4x4 blocks of 8 bytes (DXT1)
    Bc8,

    /// 4x4 blocks of 16 bytes (DXT3, DXT5)
    Bc16,
}

/// The size in bytes of a square image of edge length `edge` in the given compressed format.
/// Both the build pipeline and the GPU upload path size buffers with this.
pub fn compressed_image_size(format: CompressedFormat, edge: u32) -> usize {
    let s = edge as usize;
    let blocks = (s + 3) / 4;

    match format {
        CompressedFormat::Pvrtc2Bpp => (max(s, 8) * max(s, 8) * 2 + 7) / 8,
        CompressedFormat::Pvrtc4Bpp => (max(s, 16) * max(s, 8) * 4 + 7) / 8,
        CompressedFormat::Bc8 => blocks * blocks * 8,
        CompressedFormat::Bc16 => blocks * blocks * 16,
    }
}

/// The platform a texture is being loaded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Desktop,
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Desktop, Platform::Ios, Platform::Android];
}

/// Formats to load in place of others on certain platforms.
/// The texture data itself is left alone.
#[derive(Debug, Clone)]
pub struct FormatSubstitutions {
    table: HashMap<(SurfaceFormat, Platform), SurfaceFormat>,
}

impl FormatSubstitutions {
    /// A table that never substitutes anything.
    pub fn empty() -> Self {
        FormatSubstitutions {
            table: HashMap::new(),
        }
    }

    /// Load `substitute` instead of `requested` on `platform`.
    pub fn insert(&mut self, requested: SurfaceFormat, platform: Platform, substitute: SurfaceFormat) {
        self.table.insert((requested, platform), substitute);
    }

    /// Load `substitute` instead of `requested` on every platform.
    pub fn insert_all(&mut self, requested: SurfaceFormat, substitute: SurfaceFormat) {
        for platform in Platform::ALL.iter() {
            self.insert(requested, *platform, substitute);
        }
    }

    /// Get the format that should actually be used for `requested` on `platform`.
    pub fn resolve(&self, requested: SurfaceFormat, platform: Platform) -> SurfaceFormat {
        self.table
            .get(&(requested, platform))
            .copied()
            .unwrap_or(requested)
    }
}

impl Default for FormatSubstitutions {
    fn default() -> Self {
        let mut table = Self::empty();

        // PVRTC assets are written out with the DXT format ids
        table.insert(SurfaceFormat::Dxt3, Platform::Ios, SurfaceFormat::RgbaPvrtc2Bpp);
        table.insert(SurfaceFormat::Dxt5, Platform::Ios, SurfaceFormat::RgbaPvrtc4Bpp);

        table.insert_all(SurfaceFormat::NormalizedByte4, SurfaceFormat::Color);

        table
    }
}
