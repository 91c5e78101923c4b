#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use stockton_texture::{
    asset::{AssetHeader, CubeAsset},
    mips::level_extent,
    SurfaceFormat,
};
use stockton_texture_gpu::HeadlessDevice;

pub fn shared_device() -> Arc<RwLock<HeadlessDevice>> {
    Arc::new(RwLock::new(HeadlessDevice::new()))
}

/// Some recognisable bytes
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// A cube asset where every level is filled with `pattern`, seeded by face and level.
pub fn patterned_asset(format: SurfaceFormat, size: u32, level_count: u32) -> CubeAsset {
    let levels = (0..6)
        .map(|face| {
            (0..level_count)
                .map(|level| {
                    let len = format.image_size(level_extent(size, level));
                    pattern(len, face * 16 + level as u8)
                })
                .collect()
        })
        .collect();

    CubeAsset {
        header: AssetHeader {
            format,
            size,
            level_count,
        },
        levels,
    }
}

pub fn asset_bytes(asset: &CubeAsset) -> Vec<u8> {
    let mut out = Vec::new();
    asset.write_to(&mut out).unwrap();
    out
}
