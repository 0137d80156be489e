use aphrodite_core::ephemeris::time::J2000;
use aphrodite_core::ephemeris::Observer;
use aphrodite_core::{Body, ChartAssembler, ChartRequest, EngineConfig, EphemerisAdapter, GeoLocation};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn bench_positions(c: &mut Criterion) {
    let adapter = EphemerisAdapter::analytic();
    let bodies = [Body::Sun, Body::Moon, Body::Mercury, Body::Venus, Body::Mars];

    c.bench_function("analytic_positions", |b| {
        b.iter(|| {
            for body in bodies {
                let _ = adapter.position(black_box(body), black_box(J2000 + 1000.5), &Observer::Geocentric);
            }
        })
    });
}

fn bench_assemble(c: &mut Criterion) {
    let assembler = ChartAssembler::new(EphemerisAdapter::analytic(), Arc::new(EngineConfig::default()));
    let location = GeoLocation::new(40.7128, -74.0060).unwrap();
    let request = ChartRequest::new(Utc.with_ymd_and_hms(1990, 7, 15, 14, 30, 0).unwrap(), location);

    c.bench_function("assemble_natal_chart", |b| b.iter(|| assembler.assemble(black_box(&request))));
}

criterion_group!(benches, bench_positions, bench_assemble);
criterion_main!(benches);
