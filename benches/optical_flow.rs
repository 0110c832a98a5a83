use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hornflow::optical_flow::{FlowConfig, FlowPipeline, Frame, RenderMode};

fn generate_frame_pair(width: usize, height: usize) -> (Frame, Frame) {
    let mut prev = Frame::new(width, height);
    let mut curr = Frame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 7 + y * 13) % 256) as f32;
            prev.set(x, y, value);
            let shifted = (((x + width - 1) % width) * 7 + y * 13) % 256;
            curr.set(x, y, shifted as f32);
        }
    }
    (prev, curr)
}

fn benchmark_flow_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_by_size");

    let sizes = vec![
        (160, 120, "160x120"),
        (320, 240, "320x240"),
        (640, 480, "640x480"),
    ];

    for (width, height, label) in sizes {
        let (prev, curr) = generate_frame_pair(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &(prev, curr),
            |b, (prev, curr)| {
                let pipeline = FlowPipeline::new(FlowConfig::default());

                b.iter(|| {
                    let _ = pipeline.compute(black_box(prev), black_box(curr));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_flow_by_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_by_iterations");

    let (prev, curr) = generate_frame_pair(320, 240);

    for iters in [1u32, 5, 20] {
        group.bench_with_input(
            BenchmarkId::from_parameter(iters),
            &iters,
            |b, &iters| {
                let config = FlowConfig::builder().max_iter(iters).build();
                let pipeline = FlowPipeline::new(config);

                b.iter(|| {
                    let _ = pipeline.compute(black_box(&prev), black_box(&curr));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_render_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_modes");

    let (prev, curr) = generate_frame_pair(320, 240);

    for (mode, label) in [(RenderMode::Dense, "dense"), (RenderMode::Sparse, "sparse")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &mode, |b, &mode| {
            let config = FlowConfig::builder().mode(mode).max_iter(5).build();
            let pipeline = FlowPipeline::new(config);

            b.iter(|| {
                let _ = pipeline.compute(black_box(&prev), black_box(&curr));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flow_by_size,
    benchmark_flow_by_iterations,
    benchmark_render_modes
);
criterion_main!(benches);
