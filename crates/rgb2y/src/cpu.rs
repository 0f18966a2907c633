//! CPU luma conversion.
//!
//! Uses the same fixed-point arithmetic as the GPU kernel, so results are
//! byte-identical across backends.

use crate::error::{Result, Rgb2YError};
use crate::format::PixelFormat;
use crate::parallel::ExecutionStrategy;
use crate::weighting::LumaWeighting;
use kornia_image::{allocator::ImageAllocator, Image};
use kornia_tensor::CpuAllocator;
use rayon::prelude::*;

fn convert_span(weighting: LumaWeighting, format: PixelFormat, src: &[u8], dst: &mut [u8]) {
    for (px, y) in src.chunks_exact(format.channels()).zip(dst.iter_mut()) {
        let (r, g, b) = format.rgb_of(px);
        *y = weighting.luma(r, g, b);
    }
}

/// Convert `pixels` pixels of interleaved color data to luma.
///
/// Writes `dst[..pixels]` and leaves the rest of `dst` untouched.
///
/// # Arguments
///
/// * `weighting` - Channel weighting
/// * `format` - Byte layout of `src`
/// * `src` - Source pixels, at least `pixels * format.channels()` bytes
/// * `pixels` - Number of pixels to convert
/// * `dst` - Output luma bytes, at least `pixels` long
/// * `strategy` - How to split the work across threads
///
/// # Example
///
/// ```
/// use rgb2y::{rgb_to_y, ExecutionStrategy, LumaWeighting, PixelFormat};
///
/// let src = [255, 0, 0, 0, 255, 0];
/// let mut dst = [0u8; 2];
/// rgb_to_y(
///     LumaWeighting::Perceptual,
///     PixelFormat::Rgb8,
///     &src,
///     2,
///     &mut dst,
///     ExecutionStrategy::Serial,
/// )?;
/// assert_eq!(dst, [77, 149]);
/// # Ok::<(), rgb2y::Rgb2YError>(())
/// ```
pub fn rgb_to_y(
    weighting: LumaWeighting,
    format: PixelFormat,
    src: &[u8],
    pixels: usize,
    dst: &mut [u8],
    strategy: ExecutionStrategy,
) -> Result<()> {
    let channels = format.channels();
    let available = src.len() / channels;
    if pixels > available {
        return Err(Rgb2YError::InvalidPixelCount {
            requested: pixels,
            available,
        });
    }
    if dst.len() < pixels {
        return Err(Rgb2YError::InvalidBufferSize {
            expected: pixels,
            actual: dst.len(),
        });
    }

    let chunk = strategy.chunk_pixels(pixels)?;
    if pixels == 0 {
        return Ok(());
    }

    let src = &src[..pixels * channels];
    let dst = &mut dst[..pixels];

    match chunk {
        None => convert_span(weighting, format, src, dst),
        Some(chunk) => {
            let chunk = chunk.min(pixels);
            tracing::trace!(pixels, chunk, ?weighting, "parallel luma conversion");
            dst.par_chunks_mut(chunk)
                .zip(src.par_chunks(chunk * channels))
                .for_each(|(dst_chunk, src_chunk)| {
                    convert_span(weighting, format, src_chunk, dst_chunk)
                });
        }
    }

    Ok(())
}

/// Convert an RGB image to a single-channel luma image.
///
/// # Arguments
///
/// * `src` - The source RGB image with shape (H, W, 3).
/// * `dst` - The destination luma image with shape (H, W, 1).
/// * `weighting` - Channel weighting.
/// * `strategy` - How to split the work across threads.
pub fn rgb_to_y_image<A1: ImageAllocator, A2: ImageAllocator>(
    src: &Image<u8, 3, A1>,
    dst: &mut Image<u8, 1, A2>,
    weighting: LumaWeighting,
    strategy: ExecutionStrategy,
) -> Result<()> {
    if src.size() != dst.size() {
        return Err(Rgb2YError::ImageSizeMismatch {
            src_width: src.cols(),
            src_height: src.rows(),
            dst_width: dst.cols(),
            dst_height: dst.rows(),
        });
    }

    let pixels = src.cols() * src.rows();
    rgb_to_y(
        weighting,
        PixelFormat::Rgb8,
        src.as_slice(),
        pixels,
        dst.as_slice_mut(),
        strategy,
    )
}

/// Convert an RGB image to a newly allocated luma image.
pub fn rgb_to_y_image_alloc<A: ImageAllocator>(
    src: &Image<u8, 3, A>,
    weighting: LumaWeighting,
    strategy: ExecutionStrategy,
) -> Result<Image<u8, 1, CpuAllocator>> {
    let mut dst = Image::from_size_val(src.size(), 0u8, CpuAllocator)?;
    rgb_to_y_image(src, &mut dst, weighting, strategy)?;
    Ok(dst)
}
