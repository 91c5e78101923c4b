//! The interface between cube textures and whatever is actually storing them.

use stockton_texture::SurfaceFormat;

use anyhow::Result;
use hal::image::SamplerDesc;

/// A face of a cube texture, in the order they're stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// A rectangle of pixels within a single mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// The whole of a level with the given edge length
    pub fn full(extent: u32) -> Self {
        Region {
            x: 0,
            y: 0,
            width: extent,
            height: extent,
        }
    }

    pub fn is_full(&self, extent: u32) -> bool {
        *self == Self::full(extent)
    }

    /// Returns true if this is non-empty, and fits inside a level with the given edge length.
    pub fn fits_within(&self, extent: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);

        self.width > 0
            && self.height > 0
            && matches!((right, bottom), (Some(r), Some(b)) if r <= extent && b <= extent)
    }
}

/// Everything a device needs to know to create a cube texture.
#[derive(Debug, Clone)]
pub struct CubeSpec {
    /// Edge length of level 0
    pub size: u32,
    pub format: SurfaceFormat,
    pub level_count: u32,

    /// If true, levels past 0 are generated by the device and never uploaded.
    pub generate_mips: bool,

    pub sampler: SamplerDesc,
}

/// Something that can store cube textures.
///
/// Compressed formats get one reservation per face per level, using [`Self::reserve_level`].
/// Uncompressed formats get one reservation per face covering the whole chain, using
/// [`Self::reserve_chain`]. Writes are only valid for storage that's been reserved.
pub trait TextureDevice {
    /// Identifies a cube texture on this device. This is owned by exactly one texture.
    type Handle;

    fn create_cube(&mut self, spec: &CubeSpec) -> Result<Self::Handle>;

    /// Reserve `bytes` of storage for one level of one face.
    fn reserve_level(
        &mut self,
        handle: &Self::Handle,
        face: CubeFace,
        level: u32,
        bytes: usize,
    ) -> Result<()>;

    /// Reserve storage for every level of one face. `level_sizes` has one entry per level.
    fn reserve_chain(
        &mut self,
        handle: &Self::Handle,
        face: CubeFace,
        level_sizes: &[usize],
    ) -> Result<()>;

    /// Replace the whole of a compressed level.
    fn write_compressed(
        &mut self,
        handle: &Self::Handle,
        face: CubeFace,
        level: u32,
        data: &[u8],
    ) -> Result<()>;

    /// Write tightly packed rows of pixels into `region` of an uncompressed level.
    fn write_pixels(
        &mut self,
        handle: &Self::Handle,
        face: CubeFace,
        level: u32,
        region: Region,
        data: &[u8],
    ) -> Result<()>;

    /// Returns true if [`Self::generate_mipmaps`] works for textures in `format`.
    fn supports_mip_generation(&self, format: SurfaceFormat) -> bool;

    /// Fill every level past 0 of `face` from level 0.
    fn generate_mipmaps(&mut self, handle: &Self::Handle, face: CubeFace) -> Result<()>;

    /// Free everything the texture was using.
    fn destroy_cube(&mut self, handle: Self::Handle);
}
