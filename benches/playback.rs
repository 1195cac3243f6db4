//! Benchmarks for playback advancement and render-directive preparation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xlplay::layout::MarqueeLayout;
use xlplay::playback::{CountingScheduler, PlaybackEngine};
use xlplay::render::RenderFrame;
use xlplay::types::{Dataset, PlaybackSettings};

fn make_dataset(rows: usize, cols: usize) -> Dataset {
    Dataset {
        headers: (0..cols).map(|c| format!("col{c}")).collect(),
        rows: (0..rows)
            .map(|r| (0..cols).map(|c| format!("r{r}c{c}")).collect())
            .collect(),
        source_id: "bench.xlsx".to_string(),
        styles: None,
    }
}

/// Benchmark a long run of frame advancement including wraps
fn bench_advance(c: &mut Criterion) {
    let layout = MarqueeLayout::new(100, 52);

    c.bench_function("advance_10k_frames", |b| {
        b.iter(|| {
            let mut sched = CountingScheduler::new();
            let mut engine = PlaybackEngine::new();
            engine.play(&layout, &mut sched);
            for _ in 0..10_000 {
                let _ = sched.fire();
                engine.on_frame(black_box(&layout), 3.0, 600.0, &mut sched);
            }
            engine.scroll_offset()
        })
    });
}

/// Benchmark render-directive preparation across dataset sizes
fn bench_render_frame(c: &mut Criterion) {
    let settings = PlaybackSettings::default();
    let sizes = [(10usize, 4usize), (100, 8), (500, 12)];

    let mut group = c.benchmark_group("render_frame");
    for (rows, cols) in sizes {
        let dataset = make_dataset(rows, cols);
        group.bench_with_input(
            BenchmarkId::new("build", format!("{rows}x{cols}")),
            &dataset,
            |b, dataset| {
                b.iter(|| RenderFrame::build(black_box(dataset), &settings, 300.0, 600.0))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_advance, bench_render_frame);

criterion_main!(benches);
