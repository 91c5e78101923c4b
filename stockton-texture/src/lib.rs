//! Texture data shared between the build-time texture pipeline and the runtime loader.
//!
//! Nothing in here talks to a GPU. See `stockton-texture-build` for turning authored images into
//! these types, and `stockton-texture-gpu` for uploading them.

extern crate gfx_hal as hal;

pub mod asset;
pub mod bitmap;
pub mod block;
pub mod error;
pub mod face;
pub mod format;
pub mod mips;

pub use self::asset::{AssetHeader, CubeAsset};
pub use self::bitmap::{BitmapBuffer, PixelFormat};
pub use self::block::{CompressedBlock, CompressionScheme};
pub use self::face::{MipChain, MipFaceSet, MipSurface};
pub use self::format::{
    compressed_image_size, CompressedFormat, FormatSubstitutions, Platform, SurfaceFormat,
};

/// The largest edge length a texture is resized to when it has to be repaired for compression.
pub const MAX_TEXTURE_SIZE: u32 = 1024;
