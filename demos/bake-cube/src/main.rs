//! Bakes six images into a cube texture asset, then loads it back onto a headless device.
//! Usage: `bake-cube <out.tex> <+x> <-x> <+y> <-y> <+z> <-z>`

use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter, Write},
    sync::{Arc, RwLock},
};

use stockton_texture::{BitmapBuffer, CubeAsset, MipFaceSet};
use stockton_texture_build::{TextureProcessor, TextureProcessorConfigBuilder};
use stockton_texture_gpu::{error::full_error_display, load_texture_cube, HeadlessDevice, TextureCubeConfig};

use anyhow::{anyhow, Context, Result};
use log::info;

#[cfg(feature = "pvrtexlib")]
use stockton_texture_build::pvrtexlib::PvrTexLib as Codec;

#[cfg(not(feature = "pvrtexlib"))]
use unavailable::Unavailable as Codec;

#[cfg(not(feature = "pvrtexlib"))]
mod unavailable {
    use anyhow::{anyhow, Result};
    use stockton_texture_build::{CompressRequest, Compressor, RawCompressed};

    /// Stands in when there's no compressor linked. Compression is turned off, so it's never used.
    #[derive(Default)]
    pub struct Unavailable;

    impl Compressor for Unavailable {
        fn compress(&mut self, _: &CompressRequest<'_>) -> Result<RawCompressed> {
            Err(anyhow!("Built without the pvrtexlib feature"))
        }
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{}", full_error_display(err));
    }
}

fn try_main() -> Result<()> {
    // Initialise logger
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_max_level(log::LevelFilter::Debug)
            .set_thread_mode(simplelog::ThreadLogMode::Names)
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("Error initialising logger")?;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 7 {
        return Err(anyhow!(
            "Usage: bake-cube <out.tex> <+x> <-x> <+y> <-y> <+z> <-z>"
        ));
    }

    // Decode faces
    let mut faces = Vec::with_capacity(6);
    for path in args[1..].iter() {
        let img = image::open(path)
            .with_context(|| format!("Error opening {}", path))?
            .to_rgba8();
        faces.push(BitmapBuffer::from_rgba_image(img)?);
    }
    let faces = MipFaceSet::from_bitmaps(faces).context("Error reading cube faces")?;

    // Process them
    let config = TextureProcessorConfigBuilder::default()
        .compress(cfg!(feature = "pvrtexlib"))
        .generate_mipmaps(true)
        .build()
        .context("Error building processor config")?;

    let processed = TextureProcessor::new(config, Codec::default())
        .process(faces)
        .context("Error processing texture")?;

    // Write it out
    let asset = CubeAsset::from_face_set(&processed.faces, processed.format)?;
    {
        let file = File::create(&args[0]).with_context(|| format!("Error creating {}", args[0]))?;
        let mut writer = BufWriter::new(file);
        asset.write_to(&mut writer)?;
        writer.flush().context("Error writing asset")?;
    }

    // Read it back in
    let device = Arc::new(RwLock::new(HeadlessDevice::new()));
    let file = File::open(&args[0]).with_context(|| format!("Error opening {}", args[0]))?;
    let mut cube = load_texture_cube(
        &mut BufReader::new(file),
        device,
        &TextureCubeConfig::default(),
    )
    .context("Error loading asset")?;

    info!(
        "Baked {}: {}x{} {:?}, {} levels, {} bytes per face at level 0",
        args[0],
        cube.size(),
        cube.size(),
        cube.format(),
        cube.level_count(),
        cube.image_size(0)
    );

    cube.release()?;

    Ok(())
}
