//! Loading cube texture assets straight onto a device

use std::{
    io::Read,
    sync::{Arc, RwLock},
};

use crate::{
    config::TextureCubeConfig,
    cube::{MipSource, TextureCube},
    device::{CubeFace, TextureDevice},
};

use stockton_texture::asset::{read_level, AssetHeader};

use anyhow::{Context, Result};
use log::{debug, info};

/// Read a cube texture asset from `reader` and upload all of it to `device`.
/// If anything goes wrong, whatever was allocated on the device is released.
pub fn load_texture_cube<R: Read, D: TextureDevice>(
    reader: &mut R,
    device: Arc<RwLock<D>>,
    config: &TextureCubeConfig,
) -> Result<TextureCube<D>> {
    let header = AssetHeader::read_from(reader).context("Error reading texture header")?;

    let format = config.substitutions.resolve(header.format, config.platform);
    if format != header.format {
        info!(
            "Loading {:?} texture as {:?} on {:?}",
            header.format, format, config.platform
        );
    }

    let mips = match header.level_count {
        1 => MipSource::None,
        n => MipSource::Precomputed(n),
    };

    let mut cube = TextureCube::new(device, header.size, format, mips, config)
        .context("Error creating cube texture")?;

    for face in CubeFace::ALL.iter() {
        for level in 0..header.level_count {
            let data = read_level(reader)
                .with_context(|| format!("Error reading {:?} level {}", face, level))?;

            cube.upload(*face, level, None, &data)?;
        }
    }

    debug!(
        "Loaded {}x{} {:?} cube texture with {} levels",
        header.size, header.size, format, header.level_count
    );

    Ok(cube)
}
