//! A cube texture, owning its storage on a device.

use std::sync::{Arc, RwLock};

use crate::{
    config::TextureCubeConfig,
    device::{CubeFace, CubeSpec, Region, TextureDevice},
    error::{LockPoisoned, UploadError, UsageError},
};

use stockton_texture::{
    mips::{level_extent, mip_level_count},
    SurfaceFormat,
};

use anyhow::{Context, Result};
use hal::image::{Filter, SamplerDesc};
use log::{debug, error};

/// Where a texture's levels past 0 come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipSource {
    /// Only level 0
    None,

    /// Generated by the device whenever level 0 is uploaded
    Generate,

    /// This many levels, all uploaded separately
    Precomputed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    /// Storage is reserved, but nothing has been uploaded
    Allocated,

    /// At least one level has been uploaded
    Uploaded,

    Released,
}

/// A cube texture on device `D`.
/// Releases its storage when dropped, if [`Self::release`] hasn't been called.
pub struct TextureCube<D: TextureDevice> {
    device: Arc<RwLock<D>>,
    handle: Option<D::Handle>,
    size: u32,
    format: SurfaceFormat,
    level_count: u32,
    mips: MipSource,
    sampler: SamplerDesc,

    /// Bitmask of uploaded levels, per face
    uploaded: [u64; 6],
}

impl<D: TextureDevice> TextureCube<D> {
    /// Create a cube texture and reserve storage for every face and level.
    pub fn new(
        device: Arc<RwLock<D>>,
        size: u32,
        format: SurfaceFormat,
        mips: MipSource,
        config: &TextureCubeConfig,
    ) -> Result<Self> {
        if size == 0 {
            return Err(UsageError::ZeroSize.into());
        }

        if format.is_compressed() && !size.is_power_of_two() {
            return Err(UsageError::NonPowerOfTwoCompressed { size, format }.into());
        }

        let max_levels = mip_level_count(size, size);
        let level_count = match mips {
            MipSource::None => 1,
            MipSource::Generate if format.is_compressed() => {
                return Err(UsageError::CompressedMipGeneration(format).into())
            }
            MipSource::Generate => max_levels,
            MipSource::Precomputed(n) if n == 0 || n > max_levels => {
                return Err(UsageError::LevelCount {
                    requested: n,
                    max: max_levels,
                }
                .into())
            }
            MipSource::Precomputed(n) => n,
        };

        let mut sampler = config.sampler.clone();
        if level_count > 1 {
            sampler.mip_filter = Filter::Linear;
        }

        let spec = CubeSpec {
            size,
            format,
            level_count,
            generate_mips: mips == MipSource::Generate,
            sampler: sampler.clone(),
        };

        let handle = {
            let mut device = device.write().map_err(|_| LockPoisoned::Device)?;
            if spec.generate_mips && !device.supports_mip_generation(format) {
                return Err(UsageError::MipGenerationUnsupported(format).into());
            }

            let handle = device
                .create_cube(&spec)
                .context("Error creating cube texture")?;

            if let Err(e) = reserve_storage(&mut *device, &handle, &spec) {
                device.destroy_cube(handle);
                return Err(e);
            }

            handle
        };

        debug!(
            "Allocated {}x{} {:?} cube texture with {} levels",
            size, size, format, level_count
        );

        Ok(TextureCube {
            device,
            handle: Some(handle),
            size,
            format,
            level_count,
            mips,
            sampler,
            uploaded: [0; 6],
        })
    }

    /// Upload data to one level of one face.
    /// `region` must be `None` or the whole level for compressed formats.
    /// If anything is wrong with the upload, the texture is left unchanged.
    pub fn upload(
        &mut self,
        face: CubeFace,
        level: u32,
        region: Option<Region>,
        data: &[u8],
    ) -> Result<()> {
        let handle = self.handle.as_ref().ok_or(UsageError::Released)?;

        if level >= self.level_count {
            return Err(UploadError::LevelOutOfRange {
                level,
                level_count: self.level_count,
            }
            .into());
        }

        if self.mips == MipSource::Generate && level > 0 {
            return Err(UsageError::GeneratedLevel(level).into());
        }

        let extent = level_extent(self.size, level);
        let region = region.unwrap_or_else(|| Region::full(extent));

        let expected = if self.format.is_compressed() {
            if !region.is_full(extent) {
                return Err(UploadError::PartialCompressed(level).into());
            }

            self.format.image_size(extent)
        } else {
            if !region.fits_within(extent) {
                return Err(UploadError::RegionOutOfBounds { region, extent }.into());
            }

            self.format.region_size(region.width, region.height)
        };

        if data.len() != expected {
            return Err(UploadError::DataLength {
                expected,
                actual: data.len(),
            }
            .into());
        }

        {
            let mut device = self.device.write().map_err(|_| LockPoisoned::Device)?;

            let written = if self.format.is_compressed() {
                device.write_compressed(handle, face, level, data)
            } else {
                device.write_pixels(handle, face, level, region, data)
            };
            written.with_context(|| format!("Error uploading {:?} level {}", face, level))?;

            if self.mips == MipSource::Generate {
                device
                    .generate_mipmaps(handle, face)
                    .with_context(|| format!("Error generating mipmaps for {:?}", face))?;
            }
        }

        self.uploaded[face.index()] |= 1 << level;

        Ok(())
    }

    /// Free this texture's storage. Calling this twice is an error.
    pub fn release(&mut self) -> Result<()> {
        if self.handle.is_none() {
            return Err(UsageError::Released.into());
        }

        let mut device = self.device.write().map_err(|_| LockPoisoned::Device)?;
        if let Some(handle) = self.handle.take() {
            device.destroy_cube(handle);
        }

        debug!("Released {}x{} cube texture", self.size, self.size);

        Ok(())
    }

    /// The edge length of the given level
    pub fn level_extent(&self, level: u32) -> u32 {
        level_extent(self.size, level)
    }

    /// The number of bytes in one face of the given level
    pub fn image_size(&self, level: u32) -> usize {
        self.format.image_size(self.level_extent(level))
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    pub fn mip_source(&self) -> MipSource {
        self.mips
    }

    pub fn sampler(&self) -> &SamplerDesc {
        &self.sampler
    }

    pub fn state(&self) -> TextureState {
        if self.handle.is_none() {
            TextureState::Released
        } else if self.uploaded.iter().any(|f| *f != 0) {
            TextureState::Uploaded
        } else {
            TextureState::Allocated
        }
    }

    /// Returns true if the given level of the given face has been uploaded.
    /// Generated levels count as uploaded once level 0 is.
    pub fn is_uploaded(&self, face: CubeFace, level: u32) -> bool {
        let mask = self.uploaded[face.index()];
        match self.mips {
            MipSource::Generate => level < self.level_count && mask & 1 != 0,
            _ => level < self.level_count && mask & (1 << level) != 0,
        }
    }

    /// The device's handle for this texture, if it hasn't been released.
    pub fn handle(&self) -> Option<&D::Handle> {
        self.handle.as_ref()
    }
}

impl<D: TextureDevice> Drop for TextureCube<D> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            match self.device.write() {
                Ok(mut device) => device.destroy_cube(handle),
                Err(_) => error!("Device lock poisoned, leaking cube texture"),
            }
        }
    }
}

/// Compressed formats get a reservation per level, uncompressed ones one per face.
fn reserve_storage<D: TextureDevice>(
    device: &mut D,
    handle: &D::Handle,
    spec: &CubeSpec,
) -> Result<()> {
    for face in CubeFace::ALL.iter() {
        if spec.format.is_compressed() {
            for level in 0..spec.level_count {
                let bytes = spec.format.image_size(level_extent(spec.size, level));
                device
                    .reserve_level(handle, *face, level, bytes)
                    .with_context(|| format!("Error reserving {:?} level {}", face, level))?;
            }
        } else {
            let sizes: Vec<usize> = (0..spec.level_count)
                .map(|level| spec.format.image_size(level_extent(spec.size, level)))
                .collect();
            device
                .reserve_chain(handle, *face, &sizes)
                .with_context(|| format!("Error reserving {:?}", face))?;
        }
    }

    Ok(())
}
