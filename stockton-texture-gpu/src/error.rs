//! Error types

use crate::device::{CubeFace, Region};

use stockton_texture::SurfaceFormat;
use thiserror::Error;

/// An error caused by a lock being poisoned.
/// This indicates an issue somewhere else, in another thread.
#[derive(Error, Debug)]
pub enum LockPoisoned {
    #[error("Device lock poisoned")]
    Device,
}

/// Indicates invalid usage of a texture.
#[derive(Debug, Error, PartialEq)]
pub enum UsageError {
    #[error("Texture has already been released")]
    Released,

    #[error("Level {0} is generated by the device, and can't be uploaded")]
    GeneratedLevel(u32),

    #[error("Can't have {requested} levels, at most {max} fit")]
    LevelCount { requested: u32, max: u32 },

    #[error("Device can't generate mipmaps for compressed format {0:?}")]
    CompressedMipGeneration(SurfaceFormat),

    #[error("Device can't generate mipmaps for {0:?}")]
    MipGenerationUnsupported(SurfaceFormat),

    #[error("Compressed textures must be a power of two in size, got {size} for {format:?}")]
    NonPowerOfTwoCompressed { size: u32, format: SurfaceFormat },

    #[error("Texture size must be non-zero")]
    ZeroSize,
}

/// An upload was rejected. The texture's contents are left as they were.
#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Level {level} is out of range, texture has {level_count} levels")]
    LevelOutOfRange { level: u32, level_count: u32 },

    #[error("Region {region:?} doesn't fit in a {extent}x{extent} level")]
    RegionOutOfBounds { region: Region, extent: u32 },

    #[error("Compressed level {0} must be uploaded in full")]
    PartialCompressed(u32),

    #[error("Got {actual} bytes of data, expected {expected}")]
    DataLength { expected: usize, actual: usize },
}

/// Errors from the in-memory device.
#[derive(Debug, Error, PartialEq)]
pub enum DeviceError {
    #[error("Handle doesn't refer to a live texture")]
    UnknownHandle,

    #[error("No storage reserved for {face:?} level {level}")]
    NotReserved { face: CubeFace, level: u32 },

    #[error("Storage for {face:?} level {level} has already been reserved")]
    AlreadyReserved { face: CubeFace, level: u32 },

    #[error("Write doesn't fit in {face:?} level {level}")]
    WriteBounds { face: CubeFace, level: u32 },

    #[error("{0:?} can't be written as pixels")]
    NotPixels(SurfaceFormat),

    #[error("Can't generate mipmaps for {0:?}")]
    MipGeneration(SurfaceFormat),
}

/// Displays an error with full backtrace
pub fn full_error_display(err: anyhow::Error) -> String {
    let cont = err
        .chain()
        .skip(1)
        .map(|cause| format!("    caused by: {}", cause))
        .collect::<Vec<String>>()
        .join("\n");

    format!("Error: {}\n{}", err, cont)
}
