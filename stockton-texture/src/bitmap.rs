//! In-memory pixel surfaces

use std::{cmp::max, convert::TryInto};

use crate::{
    error::{LayoutError, PixelFormatError},
    format::SurfaceFormat,
};

use image::{
    imageops::{self, FilterType},
    ImageBuffer, Rgba, RgbaImage,
};
use log::debug;

/// Float pixels are scaled by this while resampling, so that rounding to whole numbers keeps
/// 16 bits of precision.
const FLOAT_RESAMPLE_SCALE: f32 = 65535.0;

/// How the pixels of a [`BitmapBuffer`] are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8 bits per channel, RGBA order
    Rgba8,

    /// Little-endian f32 per channel, RGBA order
    RgbaF32,

    /// 16 bit packed BGR
    Bgr565,

    /// A single 8 bit alpha channel
    Alpha8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::RgbaF32 => 16,
            PixelFormat::Bgr565 => 2,
            PixelFormat::Alpha8 => 1,
        }
    }

    /// The asset format a texture of these pixels is stored as when it isn't compressed.
    pub fn surface_format(self) -> SurfaceFormat {
        match self {
            PixelFormat::Rgba8 => SurfaceFormat::Color,
            PixelFormat::RgbaF32 => SurfaceFormat::Vector4,
            PixelFormat::Bgr565 => SurfaceFormat::Bgr565,
            PixelFormat::Alpha8 => SurfaceFormat::Alpha8,
        }
    }
}

/// A 2D block of pixels held in CPU memory.
/// `bytes` is always exactly `width * height * bytes_per_pixel` long.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    bytes: Vec<u8>,
}

impl BitmapBuffer {
    /// Wrap the given bytes, checking they're the right size.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        bytes: Vec<u8>,
    ) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::EmptyExtent { width, height });
        }

        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if bytes.len() != expected {
            return Err(LayoutError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(BitmapBuffer {
            width,
            height,
            format,
            bytes,
        })
    }

    /// A buffer of the given size with every byte set to 0.
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> Result<Self, LayoutError> {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self::new(width, height, format, vec![0; len])
    }

    /// Take the pixels of an already decoded image.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self, LayoutError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelFormat::Rgba8, img.into_raw())
    }

    /// Build a float buffer from RGBA channel values.
    pub fn from_rgba_f32(width: u32, height: u32, channels: &[f32]) -> Result<Self, LayoutError> {
        Self::new(width, height, PixelFormat::RgbaF32, floats_to_bytes(channels))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Read the channels of a float buffer. None for any other format.
    pub fn rgba_f32(&self) -> Option<Vec<f32>> {
        match self.format {
            PixelFormat::RgbaF32 => Some(bytes_to_floats(&self.bytes)),
            _ => None,
        }
    }

    /// Create a new buffer of the given size from this one, using bicubic interpolation.
    /// Output is deterministic and `self` is left untouched.
    /// `width` and `height` must be non-zero.
    pub fn resample(&self, width: u32, height: u32) -> Result<BitmapBuffer, PixelFormatError> {
        if width == 0 || height == 0 {
            return Err(PixelFormatError::EmptyTarget { width, height });
        }
        debug!(
            "Resampling {}x{} {:?} bitmap to {}x{}",
            self.width, self.height, self.format, width, height
        );

        let bytes = match self.format {
            PixelFormat::Rgba8 => {
                let src: ImageBuffer<Rgba<u8>, &[u8]> =
                    ImageBuffer::from_raw(self.width, self.height, &self.bytes[..])
                        .expect("bitmap length checked on creation");

                imageops::resize(&src, width, height, FilterType::CatmullRom).into_raw()
            }
            PixelFormat::RgbaF32 => {
                let scaled: Vec<f32> = bytes_to_floats(&self.bytes)
                    .into_iter()
                    .map(|c| c * FLOAT_RESAMPLE_SCALE)
                    .collect();
                let src: ImageBuffer<Rgba<f32>, Vec<f32>> =
                    ImageBuffer::from_raw(self.width, self.height, scaled)
                        .expect("bitmap length checked on creation");

                let out: Vec<f32> = imageops::resize(&src, width, height, FilterType::CatmullRom)
                    .into_raw()
                    .into_iter()
                    .map(|c| c / FLOAT_RESAMPLE_SCALE)
                    .collect();

                floats_to_bytes(&out)
            }
            other => {
                return Err(PixelFormatError::Unsupported {
                    format: other,
                    operation: "resample",
                })
            }
        };

        Ok(BitmapBuffer {
            width,
            height,
            format: self.format,
            bytes,
        })
    }

    /// The next level down in a mip chain, ie half the size, rounding down but never below 1.
    pub fn next_mip(&self) -> Result<BitmapBuffer, PixelFormatError> {
        self.resample(max(self.width / 2, 1), max(self.height / 2, 1))
    }

    /// Multiply the colour channels of every translucent pixel by its alpha.
    /// This is not idempotent, so only do it once.
    pub fn premultiply_alpha(&mut self) -> Result<(), PixelFormatError> {
        match self.format {
            PixelFormat::Rgba8 => {
                for px in self.bytes.chunks_exact_mut(4) {
                    let alpha = u32::from(px[3]);
                    if alpha < 0xff {
                        for c in px[..3].iter_mut() {
                            *c = (u32::from(*c) * alpha / 0xff) as u8;
                        }
                    }
                }
            }
            PixelFormat::RgbaF32 => {
                for px in self.bytes.chunks_exact_mut(16) {
                    let alpha = read_f32(&px[12..16]);
                    if alpha < 1.0 {
                        for c in px[..12].chunks_exact_mut(4) {
                            let v = read_f32(c) * alpha;
                            c.copy_from_slice(&v.to_le_bytes());
                        }
                    }
                }
            }
            other => {
                return Err(PixelFormatError::Unsupported {
                    format: other,
                    operation: "premultiply_alpha",
                })
            }
        }

        Ok(())
    }

    /// Get a copy of this buffer as 8 bit RGBA. Float channels are clamped to 0..1 and rounded.
    pub fn to_rgba8(&self) -> Result<BitmapBuffer, PixelFormatError> {
        match self.format {
            PixelFormat::Rgba8 => Ok(self.clone()),
            PixelFormat::RgbaF32 => {
                let bytes = bytes_to_floats(&self.bytes)
                    .into_iter()
                    .map(|c| (c.max(0.0).min(1.0) * 255.0).round() as u8)
                    .collect();

                Ok(BitmapBuffer {
                    width: self.width,
                    height: self.height,
                    format: PixelFormat::Rgba8,
                    bytes,
                })
            }
            other => Err(PixelFormatError::Unsupported {
                format: other,
                operation: "to_rgba8",
            }),
        }
    }
}

fn read_f32(slice: &[u8]) -> f32 {
    f32::from_le_bytes(slice.try_into().unwrap())
}

fn bytes_to_floats(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(4).map(read_f32).collect()
}

fn floats_to_bytes(floats: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(floats.len() * 4);
    for f in floats {
        bytes.extend_from_slice(&f.to_le_bytes());
    }

    bytes
}
