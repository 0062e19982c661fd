use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use streamlens_quality::luma::LumaPlane;
use streamlens_quality::{filters, AnalyzerConfig, FrameView, PixelFormat, QualityAnalyzer};

/// Generate a gradient frame with seeded jitter, one byte per pixel.
fn synthetic_gray(width: usize, height: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let base = ((x + y) * 255 / (width + height)) as i32;
            let jitter: i32 = rng.gen_range(-12..=12);
            data.push((base + jitter).clamp(0, 255) as u8);
        }
    }
    data
}

fn synthetic_bgr(width: usize, height: usize) -> Vec<u8> {
    synthetic_gray(width, height)
        .into_iter()
        .flat_map(|p| [p, p.wrapping_add(8), p.wrapping_add(16)])
        .collect()
}

const SIZES: [(u32, u32); 3] = [(320, 240), (640, 480), (1280, 720)];

fn bench_grayscale_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale_reduction");

    for (w, h) in SIZES.iter() {
        let data = synthetic_bgr(*w as usize, *h as usize);
        let view = FrameView::packed(&data, *w, *h, PixelFormat::Bgr8);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &view,
            |b, v| b.iter(|| LumaPlane::from_view(black_box(v)).unwrap()),
        );
    }

    group.finish();
}

fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_blur_5");

    for (w, h) in SIZES.iter() {
        let data = synthetic_gray(*w as usize, *h as usize);
        let view = FrameView::packed(&data, *w, *h, PixelFormat::Gray8);
        let plane = LumaPlane::from_view(&view).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &plane,
            |b, p| b.iter(|| filters::binomial_blur_5(black_box(p))),
        );
    }

    group.finish();
}

fn bench_laplacian(c: &mut Criterion) {
    let mut group = c.benchmark_group("laplacian");

    for (w, h) in SIZES.iter() {
        let data = synthetic_gray(*w as usize, *h as usize);
        let view = FrameView::packed(&data, *w, *h, PixelFormat::Gray8);
        let plane = LumaPlane::from_view(&view).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &plane,
            |b, p| b.iter(|| filters::laplacian(black_box(p))),
        );
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");

    for (w, h) in SIZES.iter() {
        let data = synthetic_bgr(*w as usize, *h as usize);
        let view = FrameView::packed(&data, *w, *h, PixelFormat::Bgr8);
        let analyzer = QualityAnalyzer::new(AnalyzerConfig::default());

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &view,
            |b, v| b.iter(|| analyzer.analyze(black_box(v))),
        );
    }

    group.finish();
}

fn bench_tick_budget_compliance(c: &mut Criterion) {
    // Analysis runs once per 10 capture ticks of 33ms, so one 640x480 frame
    // must score in a small fraction of 330ms to leave the tick loop alone.
    let data = synthetic_bgr(640, 480);
    let view = FrameView::packed(&data, 640, 480, PixelFormat::Bgr8);
    let analyzer = QualityAnalyzer::new(AnalyzerConfig::default());

    c.bench_function("tick_budget_640x480", |b| {
        b.iter(|| analyzer.analyze(black_box(&view)))
    });
}

criterion_group!(
    benches,
    bench_grayscale_reduction,
    bench_blur,
    bench_laplacian,
    bench_full_analysis,
    bench_tick_budget_compliance
);
criterion_main!(benches);
