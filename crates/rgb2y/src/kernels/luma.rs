//! RGB to luma GPU kernel.

#![allow(missing_docs)]

use cubecl::prelude::*;

/// Pixels handled by one unit; their luma bytes share one output word.
pub const PIXELS_PER_UNIT: u32 = 4;

/// Luma of one packed texel (R in bits 0..8, G in 8..16, B in 16..24).
///
/// Must stay in step with `LumaWeighting::luma`.
#[cube]
pub fn texel_luma(texel: u32, #[comptime] weighted: bool) -> u32 {
    let r = texel & 0xFFu32;
    let g = (texel >> 8u32) & 0xFFu32;
    let b = (texel >> 16u32) & 0xFFu32;

    let mut y = 0u32;
    if weighted {
        y = (r * 77u32 + g * 150u32 + b * 29u32 + 128u32) >> 8u32;
    } else {
        y = (r + g + b) / 3u32;
    }
    y
}

/// RGB texture to luma GPU kernel.
///
/// # Arguments
///
/// * `texels` - Source texture, one packed texel per pixel
/// * `luma` - Output words, four luma bytes each (lane k = bits 8k..8k+8)
/// * `pixels` - Number of pixels to convert
/// * `weighted` - Perceptual weighting when true, plain average otherwise
///
/// # Thread Model
///
/// - Units are laid out on a 2D grid; rows of `CUBE_COUNT_X * CUBE_DIM_X`
///   units map to consecutive words
/// - Each unit processes four consecutive pixels
/// - Unit reads up to 4 texels
/// - Unit writes 1 word; in the last partial word, lanes at or past
///   `pixels` keep their previous contents
#[cube(launch_unchecked)]
pub fn rgb_to_y_kernel(
    texels: &Array<u32>,
    luma: &mut Array<u32>,
    pixels: u32,
    #[comptime] weighted: bool,
) {
    let word = ABSOLUTE_POS_Y * (CUBE_COUNT_X * CUBE_DIM_X) + ABSOLUTE_POS_X;
    // pixels > 0 is guaranteed by the launcher
    let last_word = (pixels - 1u32) / 4u32;

    if word < luma.len() && word <= last_word {
        let base = word * 4u32;
        let mut packed = 0u32;

        let converted = pixels - base;
        if converted < 4u32 {
            // only `converted` lanes belong to this launch
            packed = luma[word] & (0xFFFF_FFFFu32 << (converted * 8u32));
        }

        for lane in 0..4u32 {
            let px = base + lane;
            if px < pixels {
                packed = packed | (texel_luma(texels[px], weighted) << (lane * 8u32));
            }
        }

        luma[word] = packed;
    }
}
