use std::f64::consts::{PI, TAU};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use golden_spirals::core::DisplayContext;
use golden_spirals::math::{
    linspace, segmented_angles, AngleSegment, Color, SafetyLimits, SpiralGenerator, SpiralParams,
};
use golden_spirals::plot::{Axes3D, LineStyle, OrbitCamera, View};
use golden_spirals::sketches::SketchKind;

fn bench_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("spiral_points");
    let generator = SpiralGenerator::new(SpiralParams::golden(0.7).with_height(0.085))
        .with_limits(SafetyLimits::new(80.0 * PI, 300.0));

    for &n in &[1_000usize, 10_000, 100_000] {
        let theta = linspace(0.0, 200.0 * PI, n, false);
        group.bench_with_input(BenchmarkId::from_parameter(n), &theta, |b, theta| {
            b.iter(|| black_box(generator.points_3d(black_box(theta))))
        });
    }
    group.finish();
}

fn bench_segments(c: &mut Criterion) {
    let segments: Vec<AngleSegment> = (0..12)
        .map(|m| AngleSegment::new(29.5 * 23.75 * TAU, 28 + m % 3))
        .collect();
    c.bench_function("segmented_angles_12_months", |b| {
        b.iter(|| black_box(segmented_angles(black_box(&segments))))
    });
}

fn bench_rasterise(c: &mut Criterion) {
    let ctx = DisplayContext::new(800, 800);
    let theta = linspace(0.0, 20.0 * PI, 10_000, true);
    let points = SpiralGenerator::new(SpiralParams::golden(1.0).with_height(0.5)).points_3d(&theta);

    let mut axes = Axes3D::new();
    axes.plot(points, LineStyle::new(Color::GOLDENROD, 2.0).alpha(0.9));

    c.bench_function("axes3d_render_10k_points", |b| {
        b.iter(|| black_box(axes.render(&ctx, View::default())))
    });
}

fn bench_calendar_frames(c: &mut Criterion) {
    let ctx = DisplayContext::new(640, 640);
    let camera = OrbitCamera::new();

    let mut group = c.benchmark_group("calendar_frame");
    group.sample_size(10);
    for kind in [SketchKind::Hijri, SketchKind::Calendar360] {
        let sketch = kind.sketch();
        let figure = sketch.build(&ctx).expect("calendar sketch builds");
        group.bench_function(sketch.name(), |b| {
            b.iter(|| black_box(figure.render(&ctx, Some(View::new(24.0, -15.0)), &camera)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_points, bench_segments, bench_rasterise, bench_calendar_frames);
criterion_main!(benches);
