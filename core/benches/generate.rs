use criterion::{Criterion, criterion_group, criterion_main};
use pairmatch_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size) in [("classic", (4, 8)), ("square", (4, 4)), ("wide", (2, 16))] {
        let config = GameConfig::new(size, &Shape::ALL, &Color::ALL)
            .expect("benchmark config must be valid");
        group.bench_function(name, |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(RandomBoardGenerator::new(seed).generate(black_box(&config)))
            })
        });
    }
    group.finish();
}

fn bench_peek(c: &mut Criterion) {
    c.bench_function("peek/classic", |b| {
        b.iter(|| {
            let mut peek = PeekSequence::seeded(black_box((4, 8)), 1);
            while peek.show_next().is_some() {}
            black_box(peek.is_finished())
        })
    });
}

criterion_group!(benches, bench_generate, bench_peek);
criterion_main!(benches);
