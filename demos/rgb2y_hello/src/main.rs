use kornia_image::{Image, ImageSize};
use kornia_tensor::CpuAllocator;
use rgb2y::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (width, height) = (1280usize, 720usize);
    let image = synthetic_image(width, height)?;
    tracing::info!(width, height, "created synthetic RGB image");

    let t0 = Instant::now();
    let cpu = rgb_to_y_image_alloc(&image, LumaWeighting::Perceptual, ExecutionStrategy::ParallelElements)?;
    tracing::info!(elapsed = ?t0.elapsed(), "CPU conversion done");

    let y = cpu.as_slice();
    tracing::info!("first 4 luma values: {:?}", &y[..4]);

    #[cfg(feature = "cuda")]
    match init_cuda_runtime() {
        Ok(runtime) => run_gpu(&runtime, &image, cpu.as_slice())?,
        Err(e) => tracing::warn!("CUDA not available: {e}"),
    }

    #[cfg(all(feature = "wgpu", not(feature = "cuda")))]
    match init_wgpu_runtime() {
        Ok(runtime) => run_gpu(&runtime, &image, cpu.as_slice())?,
        Err(e) => tracing::warn!("WGPU not available: {e}"),
    }

    #[cfg(not(any(feature = "cuda", feature = "wgpu")))]
    {
        tracing::info!("No GPU features enabled, CPU only");
        tracing::info!("Build with: cargo run -p rgb2y_hello --features cuda");
        tracing::info!("        or: cargo run -p rgb2y_hello --features wgpu");
    }

    Ok(())
}

/// Horizontal red ramp, vertical green ramp, constant blue.
fn synthetic_image(width: usize, height: usize) -> Result<Image<u8, 3, CpuAllocator>> {
    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.push((x * 255 / width.max(1)) as u8);
            rgb.push((y * 255 / height.max(1)) as u8);
            rgb.push(128);
        }
    }
    Ok(Image::new(ImageSize { width, height }, rgb, CpuAllocator)?)
}

#[cfg(any(feature = "cuda", feature = "wgpu"))]
fn run_gpu<R: CubeclRuntime>(
    runtime: &RuntimeContext<R>,
    image: &Image<u8, 3, CpuAllocator>,
    expected: &[u8],
) -> Result<()> {
    let mem = runtime.memory_properties();
    tracing::info!(
        backend = runtime.backend_name(),
        max_page = mem.max_page_size,
        align = mem.alignment,
        preferred = ?Backend::preferred(),
        "GPU runtime ready"
    );

    let texture = RgbTexture::from_image(image, runtime)?;
    let luma = LumaBuffer::allocate(texture.pixels(), runtime)?;

    // Warm up (first launch compiles the kernel)
    rgb_to_y_execute(LumaWeighting::Perceptual, &texture, texture.pixels(), &luma, runtime)?;
    runtime.sync();

    let t1 = Instant::now();
    for _ in 0..100 {
        rgb_to_y_execute(LumaWeighting::Perceptual, &texture, texture.pixels(), &luma, runtime)?;
    }
    runtime.sync();
    tracing::info!(per_iter = ?(t1.elapsed() / 100), "GPU conversion timing");

    let gpu = luma.download(runtime)?;
    let mismatches = gpu.iter().zip(expected).filter(|(a, b)| a != b).count();
    if mismatches == 0 {
        tracing::info!("GPU output matches CPU ({} pixels)", gpu.len());
    } else {
        tracing::warn!(mismatches, "GPU output differs from CPU");
    }

    Ok(())
}
