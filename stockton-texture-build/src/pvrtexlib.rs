//! Compression using the native PVRTexLib wrapper.
//! Only built with the `pvrtexlib` feature, and needs `PVRTexLibC` available to link against.

use std::{
    os::raw::{c_int, c_uchar},
    ptr, slice,
};

use crate::{
    codec::{CompressRequest, Compressor, RawCompressed},
    error::CodecError,
};

use anyhow::Result;

#[link(name = "PVRTexLibC")]
extern "C" {
    fn CompressTexture(
        data: *const c_uchar,
        height: c_int,
        width: c_int,
        mip_levels: c_int,
        pre_multiplied: bool,
        pvrtc4bpp_compression: bool,
        data_sizes: *mut *mut c_int,
    ) -> *mut c_uchar;
}

/// Compresses with PVRTexLib. Both of the buffers it hands back are copied immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct PvrTexLib;

impl Compressor for PvrTexLib {
    fn compress(&mut self, request: &CompressRequest<'_>) -> Result<RawCompressed> {
        let mut sizes_ptr: *mut c_int = ptr::null_mut();

        // Safety: pixels outlives the call, and the library only reads
        // width * height * 4 bytes from it.
        let data_ptr = unsafe {
            CompressTexture(
                request.pixels.as_ptr(),
                request.height as c_int,
                request.width as c_int,
                request.mip_levels as c_int,
                request.premultiplied,
                request.four_bpp,
                &mut sizes_ptr,
            )
        };

        if data_ptr.is_null() || sizes_ptr.is_null() {
            return Err(CodecError::NullResult.into());
        }

        // Safety: the library returns one size per requested level.
        let raw_sizes = unsafe { slice::from_raw_parts(sizes_ptr, request.mip_levels as usize) };

        let mut level_sizes = Vec::with_capacity(raw_sizes.len());
        for (level, size) in raw_sizes.iter().enumerate() {
            if *size < 0 {
                return Err(CodecError::NegativeSize(level).into());
            }
            level_sizes.push(*size as u32);
        }

        let total: usize = level_sizes.iter().map(|s| *s as usize).sum();

        // Safety: the data buffer is exactly as long as the sizes add up to.
        let data = unsafe { slice::from_raw_parts(data_ptr, total) }.to_vec();

        Ok(RawCompressed { data, level_sizes })
    }
}
