//! Processes authored textures into something that can be written out as an asset.

use crate::{
    codec::{self, Compressor},
    config::TextureProcessorConfig,
    diagnostics::Diagnostic,
    error::BuildError,
};

use stockton_texture::{
    mips::{is_compressible_extent, mip_level_count, repaired_edge},
    BitmapBuffer, CompressionScheme, MipChain, MipFaceSet, MipSurface, SurfaceFormat,
};

use anyhow::{Context, Result};
use log::{debug, info};

/// A texture that's been through the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTexture {
    pub faces: MipFaceSet,

    /// The format to write the texture out as
    pub format: SurfaceFormat,

    /// Everything noteworthy that happened while processing, in order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Validates, resizes, premultiplies and compresses textures.
/// Each call to [`Self::process`] is independent of any other.
pub struct TextureProcessor<C> {
    config: TextureProcessorConfig,
    compressor: C,
}

impl<C: Compressor> TextureProcessor<C> {
    pub fn new(config: TextureProcessorConfig, compressor: C) -> Self {
        TextureProcessor { config, compressor }
    }

    pub fn config(&self) -> &TextureProcessorConfig {
        &self.config
    }

    /// Get a reference to the compressor.
    pub fn compressor(&self) -> &C {
        &self.compressor
    }

    /// Process a 2D or cube texture.
    /// Only level 0 of each face is used, the rest of the chain is regenerated if needed.
    pub fn process(&mut self, input: MipFaceSet) -> Result<ProcessedTexture> {
        self.config.validate()?;

        let mut diagnostics = Vec::new();
        let mut faces = base_levels(input)?;
        let (mut width, mut height) = (faces[0].width(), faces[0].height());

        if !self.config.compress {
            return self.finish_uncompressed(faces, diagnostics);
        }

        // Only square, power of two textures can be compressed, so resize anything else.
        if !is_compressible_extent(width, height) {
            let edge = repaired_edge(width, height, self.config.max_texture_size);
            faces = faces
                .iter()
                .map(|face| face.resample(edge, edge))
                .collect::<Result<_, _>>()
                .context("Error resizing texture for compression")?;

            width = edge;
            height = edge;
            Diagnostic::Resized { width, height }.emit(&mut diagnostics);
        }

        let scheme = self.config.compression;
        if !is_compressible_extent(width, height) || scheme == CompressionScheme::None {
            if scheme != CompressionScheme::None {
                Diagnostic::CompressionSkipped.emit(&mut diagnostics);
            }

            return self.finish_uncompressed(faces, diagnostics);
        }

        // The compressor makes the levels itself, we just tell it how many.
        let mip_levels = if self.config.generate_mipmaps {
            mip_level_count(width, height)
        } else {
            1
        };

        if self.config.premultiply_alpha {
            for face in faces.iter_mut() {
                face.premultiply_alpha()
                    .context("Error premultiplying alpha")?;
            }
        }

        let mut chains = Vec::with_capacity(faces.len());
        for (idx, face) in faces.iter().enumerate() {
            let pixels = face.to_rgba8().context("Error preparing pixels for compressor")?;
            let blocks = codec::compress(
                &mut self.compressor,
                pixels.bytes(),
                height,
                width,
                mip_levels,
                self.config.premultiply_alpha,
                scheme,
            )
            .with_context(|| format!("Error compressing face {}", idx))?;

            chains.push(blocks.into_iter().map(MipSurface::from).collect::<MipChain>());
        }

        info!(
            "Compressed {} face(s) at {}x{} with {:?}, {} level(s)",
            chains.len(),
            width,
            height,
            scheme,
            mip_levels
        );

        Ok(ProcessedTexture {
            faces: MipFaceSet::new(chains)?,
            format: scheme.surface_format(),
            diagnostics,
        })
    }

    fn finish_uncompressed(
        &self,
        mut faces: Vec<BitmapBuffer>,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<ProcessedTexture> {
        if self.config.premultiply_alpha {
            for face in faces.iter_mut() {
                face.premultiply_alpha()
                    .context("Error premultiplying alpha")?;
            }
        }

        let format = faces[0].format().surface_format();
        let chains = faces
            .into_iter()
            .map(|base| self.build_chain(base))
            .collect::<Result<Vec<_>>>()?;

        debug!("Texture left uncompressed as {:?}", format);

        Ok(ProcessedTexture {
            faces: MipFaceSet::new(chains)?,
            format,
            diagnostics,
        })
    }

    /// Generate the mip chain for an uncompressed face, if we've been asked to.
    fn build_chain(&self, base: BitmapBuffer) -> Result<MipChain> {
        let levels = if self.config.generate_mipmaps {
            mip_level_count(base.width(), base.height())
        } else {
            1
        };

        let mut chain = Vec::with_capacity(levels as usize);
        let mut current = base;
        for _ in 1..levels {
            let next = current.next_mip().context("Error generating mipmaps")?;
            chain.push(MipSurface::from(current));
            current = next;
        }
        chain.push(MipSurface::from(current));

        Ok(chain)
    }
}

/// Take level 0 of each face, which has to be plain pixels.
fn base_levels(input: MipFaceSet) -> Result<Vec<BitmapBuffer>, BuildError> {
    input
        .into_faces()
        .into_iter()
        .enumerate()
        .map(|(idx, chain)| match chain.into_iter().next() {
            Some(MipSurface::Bitmap(b)) => Ok(b),
            _ => Err(BuildError::AlreadyCompressed(idx)),
        })
        .collect()
}
