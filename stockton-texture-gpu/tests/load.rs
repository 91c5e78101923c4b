mod helpers;
use helpers::*;

use stockton_texture::{error::AssetError, Platform, SurfaceFormat};
use stockton_texture_gpu::{
    error::UploadError, load_texture_cube, CubeFace, MipSource, TextureCubeConfig, TextureState,
};

#[test]
fn loads_every_level() {
    let asset = patterned_asset(SurfaceFormat::Color, 8, 4);
    let device = shared_device();

    let cube = load_texture_cube(
        &mut &asset_bytes(&asset)[..],
        device.clone(),
        &TextureCubeConfig::default(),
    )
    .unwrap();

    assert_eq!(cube.size(), 8);
    assert_eq!(cube.level_count(), 4);
    assert_eq!(cube.mip_source(), MipSource::Precomputed(4));
    assert_eq!(cube.state(), TextureState::Uploaded);

    let dev = device.read().unwrap();
    for face in CubeFace::ALL.iter() {
        for level in 0..4 {
            assert!(cube.is_uploaded(*face, level));
            assert_eq!(
                dev.read_level(cube.handle().unwrap(), *face, level),
                Some(&asset.levels[face.index()][level as usize][..])
            );
        }
    }
}

#[test]
fn single_level() {
    let asset = patterned_asset(SurfaceFormat::RgbaPvrtc4Bpp, 32, 1);
    let cube = load_texture_cube(
        &mut &asset_bytes(&asset)[..],
        shared_device(),
        &TextureCubeConfig::default(),
    )
    .unwrap();

    assert_eq!(cube.mip_source(), MipSource::None);
    assert_eq!(cube.format(), SurfaceFormat::RgbaPvrtc4Bpp);
}

#[test]
fn substitutes_legacy_formats() {
    let asset = patterned_asset(SurfaceFormat::NormalizedByte4, 4, 1);
    let cube = load_texture_cube(
        &mut &asset_bytes(&asset)[..],
        shared_device(),
        &TextureCubeConfig::default(),
    )
    .unwrap();

    assert_eq!(cube.format(), SurfaceFormat::Color);
}

#[test]
fn pvrtc_written_as_dxt_on_ios() {
    // Level data is sized for PVRTC, but the header says DXT5
    let mut asset = patterned_asset(SurfaceFormat::RgbaPvrtc4Bpp, 16, 1);
    asset.header.format = SurfaceFormat::Dxt5;
    let bytes = asset_bytes(&asset);

    let config = TextureCubeConfig {
        platform: Platform::Ios,
        ..TextureCubeConfig::default()
    };
    let cube = load_texture_cube(&mut &bytes[..], shared_device(), &config).unwrap();
    assert_eq!(cube.format(), SurfaceFormat::RgbaPvrtc4Bpp);

    // The same asset isn't valid anywhere else
    let err = load_texture_cube(&mut &bytes[..], shared_device(), &TextureCubeConfig::default())
        .err()
        .unwrap();
    assert_eq!(
        err.downcast_ref::<UploadError>(),
        Some(&UploadError::DataLength {
            expected: 256,
            actual: 128
        })
    );
}

#[test]
fn truncated_asset_releases() {
    let asset = patterned_asset(SurfaceFormat::Color, 8, 2);
    let mut bytes = asset_bytes(&asset);
    bytes.truncate(bytes.len() - 1);

    let device = shared_device();
    let err = load_texture_cube(&mut &bytes[..], device.clone(), &TextureCubeConfig::default())
        .err()
        .unwrap();

    assert_eq!(
        err.downcast_ref::<AssetError>(),
        Some(&AssetError::Truncated {
            expected: 64,
            actual: 63
        })
    );

    let dev = device.read().unwrap();
    assert_eq!(dev.stats().cubes_created, 1);
    assert_eq!(dev.live_cubes(), 0);
}

#[test]
fn unknown_format() {
    let mut bytes = asset_bytes(&patterned_asset(SurfaceFormat::Color, 1, 1));
    bytes[..4].copy_from_slice(&42i32.to_le_bytes());

    let device = shared_device();
    let err = load_texture_cube(&mut &bytes[..], device.clone(), &TextureCubeConfig::default())
        .err()
        .unwrap();

    assert_eq!(
        err.downcast_ref::<AssetError>(),
        Some(&AssetError::UnknownSurfaceFormat(42))
    );
    assert_eq!(device.read().unwrap().stats().cubes_created, 0);
}
