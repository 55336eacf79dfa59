//! Benchmarks for the aggregator and telemetry samplers
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;
use std::sync::Arc;
use tally::aggregate::{Aggregator, FixedSource, SeededSource};
use tally::orders::{sample_orders, Order};
use tally::telemetry::{EngineeringMetrics, KpiPanel, PipelineChart, RealTimeSeries};

fn create_test_orders(count: usize) -> Vec<Order> {
    (0..count)
        .map(|i| {
            Order::new(
                i as u32 + 1,
                format!("Customer {}", i % 997),
                Decimal::new(1000 + (i as i64 * 7919) % 200_000, 2),
            )
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = Aggregator::new(Arc::new(FixedSource::new(0.5)));

    let catalog = sample_orders();
    group.throughput(Throughput::Elements(catalog.len() as u64));
    group.bench_function("catalog", |b| {
        b.iter(|| aggregator.aggregate(black_box(&catalog)))
    });

    for size in [1000, 10000] {
        let orders = create_test_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("orders_{}", size), |b| {
            b.iter(|| aggregator.aggregate(black_box(&orders)))
        });
    }

    group.finish();
}

fn bench_samplers(c: &mut Criterion) {
    let mut group = c.benchmark_group("samplers");
    let source = SeededSource::new(7);

    group.bench_function("kpi", |b| b.iter(|| KpiPanel::sample(black_box(&source))));
    group.bench_function("pipeline", |b| {
        b.iter(|| PipelineChart::sample(black_box(&source)))
    });
    group.bench_function("engineering", |b| {
        b.iter(|| {
            (
                EngineeringMetrics::sample(black_box(&source)),
                RealTimeSeries::sample(black_box(&source)),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_samplers);
criterion_main!(benches);
