//! A device that keeps textures in memory.

use std::collections::HashMap;

use crate::{
    device::{CubeFace, CubeSpec, Region, TextureDevice},
    error::DeviceError,
};

use stockton_texture::{mips::level_extent, SurfaceFormat};

use anyhow::Result;
use arrayvec::ArrayVec;
use hal::image::SamplerDesc;
use log::debug;

/// Identifies a cube on a [`HeadlessDevice`]. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct HeadlessHandle(u64);

/// Running totals of what's been done to a [`HeadlessDevice`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceStats {
    pub cubes_created: usize,
    pub cubes_destroyed: usize,
    pub reservations: usize,
    pub writes: usize,
    pub mip_generations: usize,
}

struct StoredCube {
    spec: CubeSpec,

    /// Indexed by face then level. None if not reserved yet.
    faces: ArrayVec<[Vec<Option<Vec<u8>>>; 6]>,
}

impl StoredCube {
    fn level_mut(&mut self, face: CubeFace, level: u32) -> Result<&mut Vec<u8>, DeviceError> {
        self.faces[face.index()]
            .get_mut(level as usize)
            .and_then(Option::as_mut)
            .ok_or(DeviceError::NotReserved { face, level })
    }

    fn reserve(&mut self, face: CubeFace, level: u32, bytes: usize) -> Result<(), DeviceError> {
        let slot = self.faces[face.index()]
            .get_mut(level as usize)
            .ok_or(DeviceError::NotReserved { face, level })?;

        if slot.is_some() {
            return Err(DeviceError::AlreadyReserved { face, level });
        }
        *slot = Some(vec![0; bytes]);

        Ok(())
    }
}

/// Stores cube textures in CPU memory.
#[derive(Default)]
pub struct HeadlessDevice {
    cubes: HashMap<u64, StoredCube>,
    next_id: u64,
    stats: DeviceStats,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DeviceStats {
        self.stats
    }

    /// The number of cubes that haven't been destroyed
    pub fn live_cubes(&self) -> usize {
        self.cubes.len()
    }

    /// Get the current contents of a level, if it's been reserved.
    pub fn read_level(&self, handle: &HeadlessHandle, face: CubeFace, level: u32) -> Option<&[u8]> {
        self.cubes
            .get(&handle.0)?
            .faces[face.index()]
            .get(level as usize)?
            .as_deref()
    }

    /// Get the sampler a cube was created with.
    pub fn sampler(&self, handle: &HeadlessHandle) -> Option<&SamplerDesc> {
        self.cubes.get(&handle.0).map(|c| &c.spec.sampler)
    }

    fn cube_mut(&mut self, handle: &HeadlessHandle) -> Result<&mut StoredCube, DeviceError> {
        self.cubes
            .get_mut(&handle.0)
            .ok_or(DeviceError::UnknownHandle)
    }
}

impl TextureDevice for HeadlessDevice {
    type Handle = HeadlessHandle;

    fn create_cube(&mut self, spec: &CubeSpec) -> Result<HeadlessHandle> {
        let id = self.next_id;
        self.next_id += 1;

        let faces = CubeFace::ALL
            .iter()
            .map(|_| vec![None; spec.level_count as usize])
            .collect();

        self.cubes.insert(
            id,
            StoredCube {
                spec: spec.clone(),
                faces,
            },
        );
        self.stats.cubes_created += 1;

        debug!(
            "Created cube {} ({}x{} {:?}, {} levels)",
            id, spec.size, spec.size, spec.format, spec.level_count
        );

        Ok(HeadlessHandle(id))
    }

    fn reserve_level(
        &mut self,
        handle: &HeadlessHandle,
        face: CubeFace,
        level: u32,
        bytes: usize,
    ) -> Result<()> {
        self.cube_mut(handle)?.reserve(face, level, bytes)?;
        self.stats.reservations += 1;

        Ok(())
    }

    fn reserve_chain(
        &mut self,
        handle: &HeadlessHandle,
        face: CubeFace,
        level_sizes: &[usize],
    ) -> Result<()> {
        let cube = self.cube_mut(handle)?;
        for (level, bytes) in level_sizes.iter().enumerate() {
            cube.reserve(face, level as u32, *bytes)?;
        }
        self.stats.reservations += 1;

        Ok(())
    }

    fn write_compressed(
        &mut self,
        handle: &HeadlessHandle,
        face: CubeFace,
        level: u32,
        data: &[u8],
    ) -> Result<()> {
        let dst = self.cube_mut(handle)?.level_mut(face, level)?;
        if dst.len() != data.len() {
            return Err(DeviceError::WriteBounds { face, level }.into());
        }
        dst.copy_from_slice(data);
        self.stats.writes += 1;

        Ok(())
    }

    fn write_pixels(
        &mut self,
        handle: &HeadlessHandle,
        face: CubeFace,
        level: u32,
        region: Region,
        data: &[u8],
    ) -> Result<()> {
        let cube = self.cube_mut(handle)?;
        let bpp = cube
            .spec
            .format
            .bytes_per_pixel()
            .ok_or(DeviceError::NotPixels(cube.spec.format))?;
        let extent = level_extent(cube.spec.size, level);
        let stride = extent as usize * bpp;
        let row_len = region.width as usize * bpp;

        if !region.fits_within(extent) || data.len() != row_len * region.height as usize {
            return Err(DeviceError::WriteBounds { face, level }.into());
        }

        let dst = cube.level_mut(face, level)?;
        for (row, src) in data.chunks_exact(row_len).enumerate() {
            let start = (region.y as usize + row) * stride + region.x as usize * bpp;
            dst[start..start + row_len].copy_from_slice(src);
        }
        self.stats.writes += 1;

        Ok(())
    }

    fn supports_mip_generation(&self, format: SurfaceFormat) -> bool {
        box_filter_channels(format).is_some()
    }

    fn generate_mipmaps(&mut self, handle: &HeadlessHandle, face: CubeFace) -> Result<()> {
        let cube = self.cube_mut(handle)?;
        let (size, format) = (cube.spec.size, cube.spec.format);
        let channels = box_filter_channels(format).ok_or(DeviceError::MipGeneration(format))?;

        let chain = &mut cube.faces[face.index()];
        for level in 1..chain.len() {
            let src_extent = level_extent(size, level as u32 - 1);
            let (done, rest) = chain.split_at_mut(level);
            let src = done[level - 1].as_ref().ok_or(DeviceError::NotReserved {
                face,
                level: level as u32 - 1,
            })?;
            let dst = rest[0].as_mut().ok_or(DeviceError::NotReserved {
                face,
                level: level as u32,
            })?;

            downsample(src, src_extent, channels, dst);
        }
        self.stats.mip_generations += 1;

        Ok(())
    }

    fn destroy_cube(&mut self, handle: HeadlessHandle) {
        if self.cubes.remove(&handle.0).is_some() {
            self.stats.cubes_destroyed += 1;
            debug!("Destroyed cube {}", handle.0);
        }
    }
}

/// The number of 8 bit channels per pixel, for formats we can box filter.
fn box_filter_channels(format: SurfaceFormat) -> Option<usize> {
    match format {
        SurfaceFormat::Color => Some(4),
        SurfaceFormat::Alpha8 => Some(1),
        _ => None,
    }
}

/// Average each 2x2 block of `src` into one pixel of `dst`.
/// Blocks are clipped at the edge of `src`, for when it's 1 pixel across.
fn downsample(src: &[u8], src_extent: u32, channels: usize, dst: &mut [u8]) {
    let src_extent = src_extent as usize;
    let dst_extent = std::cmp::max(src_extent / 2, 1);

    for y in 0..dst_extent {
        for x in 0..dst_extent {
            for c in 0..channels {
                let mut sum = 0u32;
                let mut count = 0u32;
                for sy in (y * 2)..std::cmp::min(y * 2 + 2, src_extent) {
                    for sx in (x * 2)..std::cmp::min(x * 2 + 2, src_extent) {
                        sum += u32::from(src[(sy * src_extent + sx) * channels + c]);
                        count += 1;
                    }
                }

                dst[(y * dst_extent + x) * channels + c] = ((sum + count / 2) / count) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_averages() {
        #[rustfmt::skip]
        let src = [
            0, 4, 10, 10,
            8, 4, 10, 10,
            0, 0, 255, 255,
            0, 0, 255, 255,
        ];
        let mut dst = [0; 4];
        downsample(&src, 4, 1, &mut dst);

        assert_eq!(dst, [4, 10, 0, 255]);
    }

    #[test]
    fn downsample_to_one() {
        let mut dst = [0; 4];
        downsample(&[10, 20, 30, 40], 1, 4, &mut dst);
        assert_eq!(dst, [10, 20, 30, 40]);

        let mut dst = [0; 4];
        downsample(&[0, 0, 0, 0, 2, 2, 2, 2, 4, 4, 4, 4, 6, 6, 6, 6], 2, 4, &mut dst);
        assert_eq!(dst, [3, 3, 3, 3]);
    }
}
