//! Error types

use crate::bitmap::PixelFormat;

use thiserror::Error;

/// An operation was asked to work on pixels it doesn't know how to read.
#[derive(Error, Debug, PartialEq)]
pub enum PixelFormatError {
    #[error("Pixel format {format:?} isn't supported by {operation}")]
    Unsupported {
        format: PixelFormat,
        operation: &'static str,
    },

    #[error("Can't resample to {width}x{height}")]
    EmptyTarget { width: u32, height: u32 },
}

/// Indicates some texture data doesn't have the shape it claims to.
#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Buffer is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Textures must be at least 1x1, got {width}x{height}")]
    EmptyExtent { width: u32, height: u32 },

    #[error("A texture must have 1 or 6 faces, got {0}")]
    FaceCount(usize),

    #[error("Face {0} has no mip levels")]
    EmptyFace(usize),

    #[error("Face {face} level {level} is {width}x{height}, expected {expected_width}x{expected_height}")]
    LevelExtent {
        face: usize,
        level: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Face {0} doesn't have the same number of levels as face 0")]
    LevelCount(usize),

    #[error("Face {face} level {level} isn't stored the same way as face 0 level 0")]
    MixedStorage { face: usize, level: usize },
}

/// Errors reading or writing a texture asset.
#[derive(Error, Debug, PartialEq)]
pub enum AssetError {
    #[error("Unknown surface format {0}")]
    UnknownSurfaceFormat(i32),

    #[error("Negative {field} in texture asset: {value}")]
    NegativeField { field: &'static str, value: i32 },

    #[error("Texture data ended early: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("A cube texture needs 6 faces, got {0}")]
    NotCube(usize),

    #[error("Cube faces must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("Asset claims {level_count} levels, but at most {max} fit")]
    LevelCount { level_count: u32, max: u32 },

    #[error("Value {0} doesn't fit in a texture asset")]
    TooLarge(usize),
}
