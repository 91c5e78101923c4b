//! Settings for loading cube textures

use stockton_texture::{FormatSubstitutions, Platform};

use hal::image::{Filter, SamplerDesc, WrapMode};

/// Configuration required to create or load a cube texture
#[derive(Debug, Clone)]
pub struct TextureCubeConfig {
    /// How to sample the texture. If it has more than one level, mip filtering is
    /// switched to linear.
    pub sampler: SamplerDesc,

    /// The platform we're running on, used for format substitution
    pub platform: Platform,

    /// Formats to load in place of others
    pub substitutions: FormatSubstitutions,
}

impl Default for TextureCubeConfig {
    fn default() -> Self {
        TextureCubeConfig {
            sampler: SamplerDesc::new(Filter::Linear, WrapMode::Clamp),
            platform: Platform::Desktop,
            substitutions: FormatSubstitutions::default(),
        }
    }
}
