//! Settings for the texture processor

use stockton_texture::{CompressionScheme, MAX_TEXTURE_SIZE};

use crate::error::ConfigError;

use serde::{Deserialize, Serialize};

/// How a texture should be processed.
/// Can be deserialised, so build tools can keep these alongside the textures they apply to.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(public, build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct TextureProcessorConfig {
    /// The compression to use if the texture is compressed.
    #[builder(default = "CompressionScheme::Pvrtc4Bpp")]
    pub compression: CompressionScheme,

    /// Whether to try compressing at all.
    /// If false, the texture is always output as plain pixels.
    #[builder(default = "true")]
    pub compress: bool,

    /// Generate a full mip chain.
    #[builder(default = "false")]
    pub generate_mipmaps: bool,

    /// Premultiply colour channels by alpha.
    #[builder(default = "true")]
    pub premultiply_alpha: bool,

    /// The largest size a texture is scaled up to when it's made square for compression.
    #[builder(default = "MAX_TEXTURE_SIZE")]
    pub max_texture_size: u32,
}

impl TextureProcessorConfig {
    /// Check the settings make sense. Configs read with serde skip the builder, so the
    /// processor calls this too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_texture_size == 0 {
            return Err(ConfigError::MaxTextureSize(self.max_texture_size));
        }

        Ok(())
    }
}

impl TextureProcessorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.max_texture_size {
            Some(0) => Err(ConfigError::MaxTextureSize(0).to_string()),
            _ => Ok(()),
        }
    }
}

impl Default for TextureProcessorConfig {
    fn default() -> Self {
        TextureProcessorConfig {
            compression: CompressionScheme::Pvrtc4Bpp,
            compress: true,
            generate_mipmaps: false,
            premultiply_alpha: true,
            max_texture_size: MAX_TEXTURE_SIZE,
        }
    }
}
