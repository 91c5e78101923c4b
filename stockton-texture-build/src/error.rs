//! Error types

use stockton_texture::CompressionScheme;
use thiserror::Error;

/// Something went wrong in or around the external compressor.
/// Any of these means no asset is produced.
#[derive(Error, Debug, PartialEq)]
pub enum CodecError {
    #[error("Compressor returned {actual} level sizes, expected {expected}")]
    SizeTable { expected: usize, actual: usize },

    #[error("Compressor returned {actual} bytes, but its size table adds up to {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("Level {level} is {actual} bytes, expected {expected} for a {width}x{height} {scheme:?} level")]
    LevelSize {
        level: usize,
        width: u32,
        height: u32,
        scheme: CompressionScheme,
        expected: usize,
        actual: usize,
    },

    #[error("Compressor returned a null pointer")]
    NullResult,

    #[error("Compressor returned a negative size for level {0}")]
    NegativeSize(usize),

    #[error("Can't compress using {0:?}")]
    NoScheme(CompressionScheme),
}

/// Indicates the processor has been set up wrong.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Max texture size must be at least 1, got {0}")]
    MaxTextureSize(u32),
}

/// Indicates the input to the pipeline can't be processed.
#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("Face {0} is already compressed")]
    AlreadyCompressed(usize),
}
