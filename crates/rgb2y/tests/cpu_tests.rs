//! Tests for CPU luma conversion

use kornia_image::{Image, ImageSize};
use kornia_tensor::CpuAllocator;
use rgb2y::*;

fn gradient_rgb(pixels: usize) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels * 3);
    for i in 0..pixels {
        rgb.push((i % 256) as u8);
        rgb.push(((i * 7) % 256) as u8);
        rgb.push(((i * 13 + 5) % 256) as u8);
    }
    rgb
}

#[test]
fn test_known_values() -> Result<()> {
    #[rustfmt::skip]
    let rgb = [
        128, 128, 128,  // Mid-gray
        255, 0, 0,      // Pure red
        0, 255, 0,      // Pure green
        0, 0, 255,      // Pure blue
        128, 64, 32,    // Custom color
    ];
    let mut y = [0u8; 5];

    rgb_to_y(
        LumaWeighting::Perceptual,
        PixelFormat::Rgb8,
        &rgb,
        5,
        &mut y,
        ExecutionStrategy::Serial,
    )?;

    // (77*128 + 150*64 + 29*32 + 128) >> 8 = 20512 >> 8 = 80
    assert_eq!(y, [128, 77, 149, 29, 80]);
    Ok(())
}

#[test]
fn test_strategies_consistency() -> Result<()> {
    // Not a multiple of any chunk size
    let pixels = 10_007;
    let rgb = gradient_rgb(pixels);

    for weighting in [LumaWeighting::Perceptual, LumaWeighting::Uniform] {
        let mut serial = vec![0u8; pixels];
        rgb_to_y(
            weighting,
            PixelFormat::Rgb8,
            &rgb,
            pixels,
            &mut serial,
            ExecutionStrategy::Serial,
        )?;

        for strategy in [
            ExecutionStrategy::Fixed(1),
            ExecutionStrategy::Fixed(4),
            ExecutionStrategy::Fixed(64),
            ExecutionStrategy::Chunked(1),
            ExecutionStrategy::Chunked(333),
            ExecutionStrategy::ParallelElements,
        ] {
            let mut out = vec![0u8; pixels];
            rgb_to_y(weighting, PixelFormat::Rgb8, &rgb, pixels, &mut out, strategy)?;
            assert_eq!(serial, out, "{strategy:?} mismatch for {weighting:?}");
        }
    }
    Ok(())
}

#[test]
fn test_matches_per_pixel_reference() -> Result<()> {
    let pixels = 4096 + 3;
    let rgb = gradient_rgb(pixels);
    let mut y = vec![0u8; pixels];

    rgb_to_y(
        LumaWeighting::Perceptual,
        PixelFormat::Rgb8,
        &rgb,
        pixels,
        &mut y,
        ExecutionStrategy::ParallelElements,
    )?;

    for (i, &got) in y.iter().enumerate() {
        let (r, g, b) = (rgb[i * 3] as u32, rgb[i * 3 + 1] as u32, rgb[i * 3 + 2] as u32);
        let expected = ((77 * r + 150 * g + 29 * b + 128) >> 8) as u8;
        assert_eq!(got, expected, "pixel {i}");
    }
    Ok(())
}

#[test]
fn test_bgr_equals_rgb() -> Result<()> {
    let pixels = 257;
    let rgb = gradient_rgb(pixels);
    let bgr: Vec<u8> = rgb
        .chunks_exact(3)
        .flat_map(|px| [px[2], px[1], px[0]])
        .collect();

    let mut from_rgb = vec![0u8; pixels];
    let mut from_bgr = vec![0u8; pixels];
    rgb_to_y(
        LumaWeighting::Uniform,
        PixelFormat::Rgb8,
        &rgb,
        pixels,
        &mut from_rgb,
        ExecutionStrategy::Chunked(16),
    )?;
    rgb_to_y(
        LumaWeighting::Uniform,
        PixelFormat::Bgr8,
        &bgr,
        pixels,
        &mut from_bgr,
        ExecutionStrategy::Chunked(16),
    )?;

    assert_eq!(from_rgb, from_bgr);
    Ok(())
}

#[test]
fn test_partial_conversion_leaves_tail() -> Result<()> {
    let rgb = gradient_rgb(100);
    let mut y = vec![0xAAu8; 100];

    rgb_to_y(
        LumaWeighting::Perceptual,
        PixelFormat::Rgb8,
        &rgb,
        37,
        &mut y,
        ExecutionStrategy::Fixed(3),
    )?;

    assert!(y[37..].iter().all(|&v| v == 0xAA));
    Ok(())
}

#[test]
fn test_fixed_zero_threads_errors() {
    let rgb = gradient_rgb(4);
    let mut y = [0u8; 4];

    let result = rgb_to_y(
        LumaWeighting::Perceptual,
        PixelFormat::Rgb8,
        &rgb,
        4,
        &mut y,
        ExecutionStrategy::Fixed(0),
    );
    assert!(matches!(result, Err(Rgb2YError::Parallel(_))));
}

#[test]
fn test_image_conversion() -> Result<()> {
    let size = ImageSize {
        width: 5,
        height: 3,
    };
    let rgb = gradient_rgb(15);
    let src = Image::<u8, 3, _>::new(size, rgb.clone(), CpuAllocator)?;
    let mut dst = Image::<u8, 1, _>::from_size_val(size, 0, CpuAllocator)?;

    rgb_to_y_image(
        &src,
        &mut dst,
        LumaWeighting::Uniform,
        ExecutionStrategy::ParallelElements,
    )?;

    let mut flat = vec![0u8; 15];
    rgb_to_y(
        LumaWeighting::Uniform,
        PixelFormat::Rgb8,
        &rgb,
        15,
        &mut flat,
        ExecutionStrategy::Serial,
    )?;
    assert_eq!(dst.as_slice(), flat.as_slice());
    Ok(())
}
