//! Executable luma conversions.
//!
//! This module provides launch wrappers around the CubeCL kernels.

use crate::error::{Result, Rgb2YError};
use crate::kernels::{rgb_to_y_kernel, PIXELS_PER_UNIT};
use crate::runtime::RuntimeContext;
use crate::texture::{LumaBuffer, RgbTexture};
use crate::weighting::LumaWeighting;
use cubecl::prelude::*;
use kornia_image::{allocator::ImageAllocator, Image};
use kornia_tensor::CpuAllocator;

/// Units per cube for every luma launch.
pub const THREADS_PER_CUBE: u32 = 256;

/// Largest cube count per grid dimension accepted by every backend (WGPU caps
/// workgroups at 65535 per dimension).
pub const MAX_CUBES_PER_DIM: u32 = 65_535;

/// Lay `num_cubes` out on an `(x, y)` grid within [`MAX_CUBES_PER_DIM`].
///
/// The grid may hold up to `x - 1` more cubes than requested; the kernel
/// skips units past the last word.
pub fn cube_grid(num_cubes: u32) -> (u32, u32) {
    if num_cubes <= MAX_CUBES_PER_DIM {
        (num_cubes, 1)
    } else {
        (MAX_CUBES_PER_DIM, num_cubes.div_ceil(MAX_CUBES_PER_DIM))
    }
}

/// Convert the first `pixels` texels of `texture` to luma on the GPU.
///
/// Writes the first `pixels` bytes of `output`. The launch is queued; read
/// `output` or call [`RuntimeContext::sync`] to wait for it.
///
/// # Arguments
///
/// * `weighting` - Channel weighting
/// * `texture` - Source texture
/// * `pixels` - Number of pixels to convert
/// * `output` - Luma buffer holding at least `pixels` bytes
/// * `runtime` - GPU runtime context
///
/// # Example
///
/// ```ignore
/// let texture = RgbTexture::upload(&rgb, w, h, PixelFormat::Rgb8, &runtime)?;
/// let luma = LumaBuffer::allocate(w * h, &runtime)?;
/// rgb_to_y_execute(LumaWeighting::Perceptual, &texture, w * h, &luma, &runtime)?;
/// let y = luma.download(&runtime)?;
/// ```
pub fn rgb_to_y_execute<R: Runtime>(
    weighting: LumaWeighting,
    texture: &RgbTexture<R>,
    pixels: usize,
    output: &LumaBuffer<R>,
    runtime: &RuntimeContext<R>,
) -> Result<()> {
    if pixels > texture.pixels() {
        return Err(Rgb2YError::InvalidPixelCount {
            requested: pixels,
            available: texture.pixels(),
        });
    }
    if pixels > output.capacity() {
        return Err(Rgb2YError::InvalidBufferSize {
            expected: pixels,
            actual: output.capacity(),
        });
    }
    let pixels_u32 = u32::try_from(pixels).map_err(|_| Rgb2YError::PixelCountOverflow(pixels))?;

    if pixels == 0 {
        return Ok(());
    }

    let words = pixels_u32.div_ceil(PIXELS_PER_UNIT);
    let num_cubes = words.div_ceil(THREADS_PER_CUBE);
    let (grid_x, grid_y) = cube_grid(num_cubes);

    let cube_count = CubeCount::Static(grid_x, grid_y, 1);
    let cube_dim = CubeDim::new(THREADS_PER_CUBE, 1, 1);

    tracing::debug!(
        pixels,
        grid_x,
        grid_y,
        ?weighting,
        backend = runtime.backend_name(),
        "launching rgb_to_y_kernel"
    );

    unsafe {
        rgb_to_y_kernel::launch_unchecked::<R>(
            runtime.client(),
            cube_count,
            cube_dim,
            ArrayArg::from_raw_parts::<u32>(texture.handle(), texture.pixels().max(1), 1),
            ArrayArg::from_raw_parts::<u32>(output.handle(), output.words().max(1), 1),
            ScalarArg::new(pixels_u32),
            weighting.is_weighted(),
        );
    }

    Ok(())
}

/// Convert an RGB image to luma on the GPU.
///
/// Uploads `src`, launches the conversion and reads the result back.
pub fn rgb_to_y_gpu<R: Runtime, A: ImageAllocator>(
    src: &Image<u8, 3, A>,
    weighting: LumaWeighting,
    runtime: &RuntimeContext<R>,
) -> Result<Image<u8, 1, CpuAllocator>> {
    let texture = RgbTexture::from_image(src, runtime)?;
    let output = LumaBuffer::allocate(texture.pixels(), runtime)?;

    rgb_to_y_execute(weighting, &texture, texture.pixels(), &output, runtime)?;

    let luma = output.download(runtime)?;
    Ok(Image::new(src.size(), luma, CpuAllocator)?)
}
