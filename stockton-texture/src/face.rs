//! Faces of a texture and their mip chains

use crate::{
    bitmap::BitmapBuffer, block::CompressedBlock, error::LayoutError, format::SurfaceFormat,
    mips::level_extent,
};

/// A single mip level of a single face.
#[derive(Debug, Clone, PartialEq)]
pub enum MipSurface {
    Bitmap(BitmapBuffer),
    Compressed(CompressedBlock),
}

impl MipSurface {
    pub fn width(&self) -> u32 {
        match self {
            MipSurface::Bitmap(b) => b.width(),
            MipSurface::Compressed(b) => b.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            MipSurface::Bitmap(b) => b.height(),
            MipSurface::Compressed(b) => b.height(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            MipSurface::Bitmap(b) => b.bytes(),
            MipSurface::Compressed(b) => b.bytes(),
        }
    }

    /// The asset format this surface would be written as.
    pub fn surface_format(&self) -> SurfaceFormat {
        match self {
            MipSurface::Bitmap(b) => b.format().surface_format(),
            MipSurface::Compressed(b) => b.scheme().surface_format(),
        }
    }
}

impl From<BitmapBuffer> for MipSurface {
    fn from(b: BitmapBuffer) -> Self {
        MipSurface::Bitmap(b)
    }
}

impl From<CompressedBlock> for MipSurface {
    fn from(b: CompressedBlock) -> Self {
        MipSurface::Compressed(b)
    }
}

/// Levels of a face, level 0 being full size.
pub type MipChain = Vec<MipSurface>;

/// The faces of a texture: 1 for a 2D texture, or 6 for a cube.
/// Every face has the same number of levels, each level is half the size of the last,
/// and every surface is stored the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct MipFaceSet {
    faces: Vec<MipChain>,
}

impl MipFaceSet {
    /// The number of faces in a cube texture
    pub const CUBE_FACES: usize = 6;

    /// Create a face set, checking the invariants above.
    pub fn new(faces: Vec<MipChain>) -> Result<Self, LayoutError> {
        if faces.len() != 1 && faces.len() != Self::CUBE_FACES {
            return Err(LayoutError::FaceCount(faces.len()));
        }

        let base = faces[0].first().ok_or(LayoutError::EmptyFace(0))?;
        let (base_width, base_height) = (base.width(), base.height());
        let base_format = base.surface_format();
        let level_count = faces[0].len();

        for (face_idx, chain) in faces.iter().enumerate() {
            if chain.is_empty() {
                return Err(LayoutError::EmptyFace(face_idx));
            }
            if chain.len() != level_count {
                return Err(LayoutError::LevelCount(face_idx));
            }

            for (level, surface) in chain.iter().enumerate() {
                let expected_width = level_extent(base_width, level as u32);
                let expected_height = level_extent(base_height, level as u32);

                if surface.width() != expected_width || surface.height() != expected_height {
                    return Err(LayoutError::LevelExtent {
                        face: face_idx,
                        level,
                        width: surface.width(),
                        height: surface.height(),
                        expected_width,
                        expected_height,
                    });
                }

                if surface.surface_format() != base_format {
                    return Err(LayoutError::MixedStorage {
                        face: face_idx,
                        level,
                    });
                }
            }
        }

        Ok(MipFaceSet { faces })
    }

    /// A set of faces with only a level 0 each.
    pub fn from_bitmaps(bitmaps: Vec<BitmapBuffer>) -> Result<Self, LayoutError> {
        Self::new(bitmaps.into_iter().map(|b| vec![b.into()]).collect())
    }

    /// A 2D texture with only one level.
    pub fn single(bitmap: BitmapBuffer) -> Self {
        MipFaceSet {
            faces: vec![vec![bitmap.into()]],
        }
    }

    pub fn faces(&self) -> &[MipChain] {
        &self.faces
    }

    pub fn into_faces(self) -> Vec<MipChain> {
        self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_cube(&self) -> bool {
        self.faces.len() == Self::CUBE_FACES
    }

    pub fn level_count(&self) -> usize {
        self.faces[0].len()
    }

    /// Get the width and height of level 0
    pub fn base_extent(&self) -> (u32, u32) {
        let base = &self.faces[0][0];
        (base.width(), base.height())
    }

    /// The asset format every surface would be written as.
    pub fn surface_format(&self) -> SurfaceFormat {
        self.faces[0][0].surface_format()
    }
}
