//! Cube textures on the GPU.
//!
//! Devices are shared as `Arc<RwLock<D>>`, and every [`TextureCube`] takes the lock whenever it
//! touches the device. [`HeadlessDevice`] keeps everything in memory, for tools and tests.

extern crate gfx_hal as hal;

pub mod config;
pub mod cube;
pub mod device;
pub mod error;
pub mod headless;
pub mod load;

pub use self::config::TextureCubeConfig;
pub use self::cube::{MipSource, TextureCube, TextureState};
pub use self::device::{CubeFace, CubeSpec, Region, TextureDevice};
pub use self::headless::{DeviceStats, HeadlessDevice, HeadlessHandle};
pub use self::load::load_texture_cube;
