mod helpers;
use helpers::*;

use stockton_texture::{
    compressed_image_size,
    error::{LayoutError, PixelFormatError},
    mips::mip_level_count,
    BitmapBuffer, CompressedBlock, CompressedFormat, CompressionScheme, MipFaceSet, MipSurface,
    PixelFormat, SurfaceFormat,
};
use stockton_texture_build::{
    error::{BuildError, CodecError, ConfigError},
    Diagnostic, TextureProcessor, TextureProcessorConfig, TextureProcessorConfigBuilder,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

fn processor(config: TextureProcessorConfig) -> TextureProcessor<PatternCompressor> {
    TextureProcessor::new(config, PatternCompressor::default())
}

fn with_mips() -> TextureProcessorConfig {
    TextureProcessorConfigBuilder::default()
        .generate_mipmaps(true)
        .build()
        .unwrap()
}

#[test]
fn compressed_output_is_square_pow2() {
    let mut rng = StdRng::seed_from_u64(0x7e57);

    for _ in 0..20 {
        let width = rng.gen_range(1..200);
        let height = rng.gen_range(1..200);
        let mips = rng.gen_bool(0.5);
        let config = TextureProcessorConfigBuilder::default()
            .generate_mipmaps(mips)
            .build()
            .unwrap();

        let out = processor(config)
            .process(MipFaceSet::single(solid(width, height, [10, 20, 30, 255])))
            .unwrap();

        assert_eq!(out.format, SurfaceFormat::RgbaPvrtc4Bpp);

        let (edge, _) = out.faces.base_extent();
        assert!(edge.is_power_of_two());
        assert!(edge >= width && edge >= height);

        let expected_levels = if mips { mip_level_count(edge, edge) } else { 1 };
        assert_eq!(out.faces.level_count(), expected_levels as usize);

        for surface in out.faces.faces()[0].iter() {
            assert_eq!(surface.width(), surface.height());
            assert!(surface.width().is_power_of_two());
        }
    }
}

#[test]
fn level_sizes_follow_scheme() {
    for (scheme, format) in [
        (CompressionScheme::Pvrtc2Bpp, CompressedFormat::Pvrtc2Bpp),
        (CompressionScheme::Pvrtc4Bpp, CompressedFormat::Pvrtc4Bpp),
    ]
    .iter()
    {
        let config = TextureProcessorConfigBuilder::default()
            .compression(*scheme)
            .generate_mipmaps(true)
            .build()
            .unwrap();

        let out = processor(config)
            .process(MipFaceSet::single(solid(64, 64, [0, 0, 0, 255])))
            .unwrap();

        assert!(out.diagnostics.is_empty());
        assert_eq!(out.faces.base_extent(), (64, 64));
        assert_eq!(out.format, scheme.surface_format());
        assert_eq!(out.faces.level_count(), 7);
        for surface in out.faces.faces()[0].iter() {
            assert_eq!(
                surface.bytes().len(),
                compressed_image_size(*format, surface.width())
            );
        }
    }
}

#[test]
fn resizes_rectangle() {
    let mut processor = processor(TextureProcessorConfig::default());
    let out = processor
        .process(MipFaceSet::single(solid(100, 50, [255, 0, 0, 255])))
        .unwrap();

    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::Resized {
            width: 128,
            height: 128
        }]
    );
    assert_eq!(out.format, SurfaceFormat::RgbaPvrtc4Bpp);
    assert_eq!(out.faces.level_count(), 1);
    assert_eq!(out.faces.base_extent(), (128, 128));
    assert_eq!(out.faces.faces()[0][0].bytes().len(), 8192);

    let calls = &processor.compressor().calls;
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].width, calls[0].height), (128, 128));
    assert_eq!(calls[0].mip_levels, 1);
    assert!(calls[0].four_bpp);
    assert_eq!(calls[0].pixels.len(), 128 * 128 * 4);
}

#[test]
fn skips_compression_when_max_isnt_pow2() {
    let config = TextureProcessorConfigBuilder::default()
        .max_texture_size(100)
        .build()
        .unwrap();
    let mut processor = processor(config);

    let out = processor
        .process(MipFaceSet::single(solid(100, 50, [0, 255, 0, 255])))
        .unwrap();

    assert_eq!(
        out.diagnostics,
        vec![
            Diagnostic::Resized {
                width: 100,
                height: 100
            },
            Diagnostic::CompressionSkipped
        ]
    );
    assert_eq!(out.format, SurfaceFormat::Color);
    assert_eq!(out.faces.base_extent(), (100, 100));
    assert!(processor.compressor().calls.is_empty());
}

#[test]
fn zero_max_size_is_rejected() {
    let config = TextureProcessorConfig {
        max_texture_size: 0,
        ..TextureProcessorConfig::default()
    };
    let mut processor = processor(config);

    let err = processor
        .process(MipFaceSet::single(solid(100, 50, [0, 0, 0, 255])))
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MaxTextureSize(0))
    );
    assert!(processor.compressor().calls.is_empty());
}

#[test]
fn no_scheme_means_no_compression() {
    let config = TextureProcessorConfigBuilder::default()
        .compression(CompressionScheme::None)
        .build()
        .unwrap();
    let mut processor = processor(config);

    let out = processor
        .process(MipFaceSet::single(solid(64, 64, [1, 2, 3, 255])))
        .unwrap();

    assert!(out.diagnostics.is_empty());
    assert_eq!(out.format, SurfaceFormat::Color);
    assert!(processor.compressor().calls.is_empty());
}

#[test]
fn uncompressed_keeps_shape_and_builds_chain() {
    let config = TextureProcessorConfigBuilder::default()
        .compress(false)
        .generate_mipmaps(true)
        .build()
        .unwrap();

    let out = processor(config)
        .process(MipFaceSet::single(solid(100, 50, [0, 0, 255, 255])))
        .unwrap();

    assert!(out.diagnostics.is_empty());
    assert_eq!(out.format, SurfaceFormat::Color);

    let extents: Vec<_> = out.faces.faces()[0]
        .iter()
        .map(|s| (s.width(), s.height()))
        .collect();
    assert_eq!(
        extents,
        vec![(100, 50), (50, 25), (25, 12), (12, 6), (6, 3), (3, 1), (1, 1)]
    );
}

#[test]
fn float_input_is_converted_for_compressor() {
    let channels = vec![1.0; 16 * 16 * 4];
    let input = BitmapBuffer::from_rgba_f32(16, 16, &channels).unwrap();

    let mut processor = processor(TextureProcessorConfig::default());
    processor.process(MipFaceSet::single(input)).unwrap();

    let call = &processor.compressor().calls[0];
    assert!(call.pixels.iter().all(|b| *b == 255));
}

#[test]
fn float_input_stays_float_uncompressed() {
    let channels = vec![0.5; 4 * 4 * 4];
    let input = BitmapBuffer::from_rgba_f32(4, 4, &channels).unwrap();

    let config = TextureProcessorConfigBuilder::default()
        .compress(false)
        .build()
        .unwrap();
    let out = processor(config).process(MipFaceSet::single(input)).unwrap();

    assert_eq!(out.format, SurfaceFormat::Vector4);
    match &out.faces.faces()[0][0] {
        MipSurface::Bitmap(b) => {
            let floats = b.rgba_f32().unwrap();
            // 0.5 * 0.5
            assert!(floats[..3].iter().all(|c| (*c - 0.25).abs() < 1e-6));
            assert!((floats[3] - 0.5).abs() < 1e-6);
        }
        other => panic!("expected bitmap, got {:?}", other),
    }
}

#[test]
fn premultiplies_before_compressing() {
    let mut processor = processor(TextureProcessorConfig::default());
    processor
        .process(MipFaceSet::single(solid(8, 8, [200, 100, 50, 128])))
        .unwrap();

    let call = &processor.compressor().calls[0];
    assert!(call.premultiplied);
    assert_eq!(&call.pixels[..4], &[100, 50, 25, 128]);
}

#[test]
fn premultiply_can_be_disabled() {
    let config = TextureProcessorConfigBuilder::default()
        .premultiply_alpha(false)
        .build()
        .unwrap();
    let mut processor = processor(config);
    processor
        .process(MipFaceSet::single(solid(8, 8, [200, 100, 50, 128])))
        .unwrap();

    let call = &processor.compressor().calls[0];
    assert!(!call.premultiplied);
    assert_eq!(&call.pixels[..4], &[200, 100, 50, 128]);
}

#[test]
fn premultiply_unsupported_is_fatal() {
    let input = BitmapBuffer::zeroed(16, 16, PixelFormat::Bgr565).unwrap();
    let err = processor(TextureProcessorConfig::default())
        .process(MipFaceSet::single(input))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PixelFormatError>(),
        Some(PixelFormatError::Unsupported {
            format: PixelFormat::Bgr565,
            ..
        })
    ));
}

#[test]
fn processes_every_cube_face() {
    let faces = (0..6)
        .map(|i| solid(32, 32, [i * 40, 0, 0, 255]))
        .collect();
    let input = MipFaceSet::from_bitmaps(faces).unwrap();

    let mut processor = processor(with_mips());
    let out = processor.process(input).unwrap();

    assert!(out.faces.is_cube());
    assert_eq!(out.faces.level_count(), 6);

    let calls = &processor.compressor().calls;
    assert_eq!(calls.len(), 6);
    for (i, call) in calls.iter().enumerate() {
        assert_eq!(call.pixels[0], i as u8 * 40);
        assert_eq!(call.mip_levels, 6);
    }
}

#[test]
fn resizes_every_cube_face() {
    let faces = (0..6).map(|_| solid(20, 20, [0, 0, 0, 255])).collect();
    let input = MipFaceSet::from_bitmaps(faces).unwrap();

    let out = processor(TextureProcessorConfig::default())
        .process(input)
        .unwrap();

    assert_eq!(out.faces.face_count(), 6);
    for chain in out.faces.faces() {
        assert_eq!((chain[0].width(), chain[0].height()), (32, 32));
    }
}

#[test]
fn rejects_compressed_input() {
    let block =
        CompressedBlock::new(8, 8, CompressionScheme::Pvrtc4Bpp, vec![0; 64]).unwrap();
    let input = MipFaceSet::new(vec![vec![block.into()]]).unwrap();

    let err = processor(TextureProcessorConfig::default())
        .process(input)
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::AlreadyCompressed(0))
    );
}

#[test]
fn bad_compressor_output_is_fatal() {
    let mut processor = TextureProcessor::new(with_mips(), ShortTableCompressor);
    let err = processor
        .process(MipFaceSet::single(solid(16, 16, [0, 0, 0, 255])))
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<CodecError>(),
        Some(&CodecError::SizeTable {
            expected: 5,
            actual: 4
        })
    );
}

#[test]
fn mismatched_faces_are_rejected_up_front() {
    let faces = vec![solid(16, 16, [0; 4]), solid(8, 8, [0; 4])];
    assert_eq!(
        MipFaceSet::from_bitmaps(faces).unwrap_err(),
        LayoutError::FaceCount(2)
    );
}
