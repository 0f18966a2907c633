use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rgb2y::*;

fn synthetic_rgb(pixels: usize) -> Vec<u8> {
    (0..pixels * 3).map(|i| (i * 31 % 251) as u8).collect()
}

fn bench_cpu_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb_to_y_cpu");

    // (width, height)
    let configs = [(640, 480), (1920, 1080)];

    for (width, height) in configs {
        let pixels = width * height;
        let parameter_string = format!("{width}x{height}");
        let rgb = synthetic_rgb(pixels);
        let mut y = vec![0u8; pixels];

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("parallel_elements", ExecutionStrategy::ParallelElements),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &rgb,
                |bench, rgb| {
                    bench.iter(|| {
                        rgb_to_y(
                            LumaWeighting::Perceptual,
                            PixelFormat::Rgb8,
                            black_box(rgb),
                            pixels,
                            black_box(&mut y),
                            strategy,
                        )
                        .unwrap()
                    });
                },
            );
        }
    }
    group.finish();
}

#[cfg(any(feature = "cuda", feature = "wgpu"))]
fn bench_gpu(c: &mut Criterion) {
    #[cfg(feature = "cuda")]
    let runtime = init_cuda_runtime();
    #[cfg(all(feature = "wgpu", not(feature = "cuda")))]
    let runtime = init_wgpu_runtime();

    let Ok(runtime) = runtime else {
        println!("GPU not available, skipping benchmarks");
        return;
    };

    let mut group = c.benchmark_group("rgb_to_y_gpu");
    for (width, height) in [(640, 480), (1920, 1080)] {
        let pixels = width * height;
        let rgb = synthetic_rgb(pixels);

        let texture = RgbTexture::upload(&rgb, width, height, PixelFormat::Rgb8, &runtime).unwrap();
        let luma = LumaBuffer::allocate(pixels, &runtime).unwrap();

        group.bench_with_input(
            BenchmarkId::new("kernel", format!("{width}x{height}")),
            &pixels,
            |bench, &pixels| {
                bench.iter(|| {
                    rgb_to_y_execute(
                        LumaWeighting::Perceptual,
                        black_box(&texture),
                        pixels,
                        black_box(&luma),
                        &runtime,
                    )
                    .unwrap();
                    runtime.sync();
                });
            },
        );
    }
    group.finish();
}

#[cfg(any(feature = "cuda", feature = "wgpu"))]
criterion_group!(benches, bench_cpu_strategies, bench_gpu);

#[cfg(not(any(feature = "cuda", feature = "wgpu")))]
criterion_group!(benches, bench_cpu_strategies);

criterion_main!(benches);
