//! Benchmarks for the placement engine.
//!
//! Run with: cargo bench -p scatter-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use scatter_layout::{
    Growth, ItemSource, Orientation, PlacementConfig, PlacementEngine, Rect, Size,
};
use std::hint::black_box;

struct Dots(usize);

impl ItemSource for Dots {
    type Item = u32;

    fn count(&self) -> usize {
        self.0
    }

    fn content(&mut self, index: usize, recycled: &mut Option<u32>) -> u32 {
        recycled.take().unwrap_or(index as u32)
    }

    fn declared_size(&self, item: &u32) -> Size {
        let side = 20 + (*item as i32 % 5) * 10;
        Size::new(side, side)
    }
}

fn engine(count: usize, strict: bool, growth: Growth) -> PlacementEngine<u32> {
    let mut engine = PlacementEngine::new(
        PlacementConfig::default()
            .with_orientation(Orientation::Vertical)
            .with_growth(growth)
            .with_seed(7)
            .with_strict(strict),
    );
    engine.set_source(Box::new(Dots(count)));
    engine
}

fn bench_first_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/first_layout");

    for n in [10, 100, 1_000] {
        for strict in [false, true] {
            let label = if strict { "strict" } else { "loose" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, &n| {
                b.iter_batched(
                    || engine(n, strict, Growth::AppendAtEnd),
                    |mut engine| {
                        let size = engine.measure(Size::new(800, 0));
                        black_box(engine.layout(Rect::from_size(size)))
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/refresh");

    for n in [100, 1_000] {
        let mut laid_out = engine(n, false, Growth::AppendAtEnd);
        let size = laid_out.measure(Size::new(800, 0));
        laid_out.layout(Rect::from_size(size));
        group.bench_function(BenchmarkId::new("pooled", n), |b| {
            b.iter(|| black_box(laid_out.refresh()))
        });
    }

    group.finish();
}

fn bench_edge_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/edge_scale");
    let mut laid_out = engine(1_000, false, Growth::PrependAtStart);
    let size = laid_out.measure(Size::new(800, 0));
    laid_out.layout(Rect::from_size(size));

    group.bench_function("1000_items", |b| {
        let mut offset = 0;
        b.iter(|| {
            offset = (offset + 37) % size.height.max(1);
            laid_out.apply_edge_scale(black_box(offset), 600);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_first_layout, bench_refresh, bench_edge_scale);
criterion_main!(benches);
