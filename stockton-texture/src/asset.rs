//! The binary layout of cube texture assets.
//! # Format
//! All integers are little-endian i32s.
//! ```text
//! int surface_format      See SurfaceFormat
//! int size                Edge length of level 0
//! int level_count
//! for each of the 6 faces, for each level:
//!     int length
//!     byte[length] data
//! ```

use std::{
    convert::{TryFrom, TryInto},
    io::{Read, Write},
};

use crate::{error::AssetError, face::MipFaceSet, format::SurfaceFormat, mips::mip_level_count};

use anyhow::{Context, Result};

/// Everything that comes before the level data of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHeader {
    pub format: SurfaceFormat,
    pub size: u32,
    pub level_count: u32,
}

impl AssetHeader {
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let format = SurfaceFormat::try_from(read_i32(reader)?)?;
        let size = read_u32(reader, "size")?;
        let level_count = read_u32(reader, "level count")?;

        let max = mip_level_count(size, size);
        if level_count > max {
            return Err(AssetError::LevelCount { level_count, max }.into());
        }

        Ok(AssetHeader {
            format,
            size,
            level_count,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_i32(writer, self.format as i32)?;
        write_i32(writer, to_i32(self.size as usize)?)?;
        write_i32(writer, to_i32(self.level_count as usize)?)?;

        Ok(())
    }
}

/// Read the data of a single level, including its length prefix.
pub fn read_level<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let len = read_u32(reader, "level length")? as usize;

    let mut data = Vec::new();
    reader
        .take(len as u64)
        .read_to_end(&mut data)
        .context("Error reading level data")?;

    if data.len() != len {
        return Err(AssetError::Truncated {
            expected: len,
            actual: data.len(),
        }
        .into());
    }

    Ok(data)
}

/// A cube texture as stored on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeAsset {
    pub header: AssetHeader,

    /// Level data, indexed by face then level.
    pub levels: Vec<Vec<Vec<u8>>>,
}

impl CubeAsset {
    /// Take the data from a cube face set. `format` is what gets written into the header,
    /// usually [`MipFaceSet::surface_format`].
    pub fn from_face_set(faces: &MipFaceSet, format: SurfaceFormat) -> Result<Self, AssetError> {
        if !faces.is_cube() {
            return Err(AssetError::NotCube(faces.face_count()));
        }

        let (width, height) = faces.base_extent();
        if width != height {
            return Err(AssetError::NotSquare { width, height });
        }

        let levels = faces
            .faces()
            .iter()
            .map(|chain| chain.iter().map(|s| s.bytes().to_vec()).collect())
            .collect();

        Ok(CubeAsset {
            header: AssetHeader {
                format,
                size: width,
                level_count: faces.level_count() as u32,
            },
            levels,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if self.levels.len() != MipFaceSet::CUBE_FACES {
            return Err(AssetError::NotCube(self.levels.len()).into());
        }

        self.header.write_to(writer)?;
        for face in self.levels.iter() {
            for level in face.iter() {
                write_i32(writer, to_i32(level.len())?)?;
                writer.write_all(level).context("Error writing level data")?;
            }
        }

        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header = AssetHeader::read_from(reader).context("Error reading asset header")?;

        let mut levels = Vec::with_capacity(MipFaceSet::CUBE_FACES);
        for face in 0..MipFaceSet::CUBE_FACES {
            let mut chain = Vec::with_capacity(header.level_count as usize);
            for level in 0..header.level_count {
                chain.push(
                    read_level(reader)
                        .with_context(|| format!("Error reading face {} level {}", face, level))?,
                );
            }
            levels.push(chain);
        }

        Ok(CubeAsset { header, levels })
    }
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0; 4];
    reader
        .read_exact(&mut buf)
        .context("Error reading texture asset")?;

    Ok(i32::from_le_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R, field: &'static str) -> Result<u32> {
    let value = read_i32(reader)?;
    value
        .try_into()
        .map_err(|_| AssetError::NegativeField { field, value }.into())
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer
        .write_all(&value.to_le_bytes())
        .context("Error writing texture asset")
}

fn to_i32(value: usize) -> Result<i32, AssetError> {
    i32::try_from(value).map_err(|_| AssetError::TooLarge(value))
}
