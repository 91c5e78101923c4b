//! Turns authored textures into what the GPU wants: square, power of two, premultiplied and
//! block compressed, with a full mip chain if asked for.
//!
//! ```rust,ignore
//! let config = TextureProcessorConfigBuilder::default()
//!     .compression(CompressionScheme::Pvrtc4Bpp)
//!     .generate_mipmaps(true)
//!     .build()?;
//!
//! let processed = TextureProcessor::new(config, PvrTexLib).process(faces)?;
//! ```

#[macro_use]
extern crate derive_builder;

pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;

#[cfg(feature = "pvrtexlib")]
pub mod pvrtexlib;

pub use self::codec::{CompressRequest, Compressor, RawCompressed};
pub use self::config::{TextureProcessorConfig, TextureProcessorConfigBuilder};
pub use self::diagnostics::Diagnostic;
pub use self::pipeline::{ProcessedTexture, TextureProcessor};
