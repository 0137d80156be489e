use aphrodite_core::aspects::{AspectCalculator, HasLongitude, LongitudePoint};
use aphrodite_core::config::default_aspects;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn points(count: usize) -> Vec<LongitudePoint> {
    (0..count)
        .map(|i| LongitudePoint::new(&format!("point_{}", i), (i as f64) * 29.7, Some(1.0 - i as f64 * 0.1)))
        .collect()
}

fn bench_aspects_between(c: &mut Criterion) {
    let calculator = AspectCalculator::new(default_aspects());
    let a = LongitudePoint::new("Sun", 100.0, Some(1.0)).luminary();
    let b = LongitudePoint::new("Moon", 218.5, Some(13.0)).luminary();

    c.bench_function("aspects_between", |bench| {
        bench.iter(|| calculator.aspects_between(black_box(&a), black_box(&b)))
    });
}

fn bench_find_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new(default_aspects());
    let points = points(14);
    let refs: Vec<&dyn HasLongitude> = points.iter().map(|p| p as &dyn HasLongitude).collect();

    c.bench_function("find_aspects_14_points", |bench| {
        bench.iter(|| calculator.find_aspects(black_box(&refs)))
    });
}

criterion_group!(benches, bench_aspects_between, bench_find_aspects);
criterion_main!(benches);
