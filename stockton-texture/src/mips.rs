//! Helpers for texture dimensions and mip chains

use std::cmp::max;

/// A texture can only be block compressed if it's square and each side is a power of two.
pub fn is_compressible_extent(width: u32, height: u32) -> bool {
    width == height && width.is_power_of_two() && height.is_power_of_two()
}

/// The edge length of the given mip level, for a level 0 edge of `edge`.
pub fn level_extent(edge: u32, level: u32) -> u32 {
    max(edge.checked_shr(level).unwrap_or(0), 1)
}

/// The number of levels in a full mip chain, down to 1x1.
/// Halves both dimensions (rounding down, never below 1) until they both reach 1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let (mut width, mut height) = (width, height);
    let mut levels = 1;

    while width > 1 || height > 1 {
        width = max(width / 2, 1);
        height = max(height / 2, 1);
        levels += 1;
    }

    levels
}

/// The square edge length to resize a texture to so that it can be compressed.
/// This won't be a power of two if `max_size` isn't.
pub fn repaired_edge(width: u32, height: u32, max_size: u32) -> u32 {
    max(width, height)
        .checked_next_power_of_two()
        .map_or(max_size, |p| p.min(max_size))
}
