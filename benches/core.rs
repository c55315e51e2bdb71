// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Benchmarks for rule evaluation and series aggregation

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use grassthink::{Aggregator, HistoryRecord, Reading, RuleEngine, TimeRange, Timestamp};

fn generate_readings(count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| {
            let hour = i % 24;
            Reading::new()
                .at(format!("2025-02-18T{:02}:00:00Z", hour).as_str())
                .with_greenhouse(14.0 + (i % 15) as f64, 40.0 + (i % 50) as f64)
                .with_soil(16.0 + (i % 12) as f64, 40.0 + (i % 35) as f64)
                .with_weather(10.0 + (i % 20) as f64, 30.0 + (i % 60) as f64)
                .with_uv((i % 11) as f64)
        })
        .collect()
}

fn generate_history(count: usize) -> Vec<HistoryRecord> {
    (0..count)
        .map(|i| {
            // One reading every 10 minutes
            HistoryRecord::new(Timestamp::Millis(1_735_689_600_000.0 + i as f64 * 600_000.0))
                .with_value("temperature", 18.0 + (i as f64 * 0.01).sin() * 4.0)
        })
        .collect()
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");

    let readings = generate_readings(1000);
    let engine = RuleEngine::new();

    group.throughput(Throughput::Elements(1000));

    group.bench_function("evaluate_1000_readings", |b| {
        b.iter(|| black_box(engine.evaluate_all(&readings)))
    });

    group.bench_function("explain_1000_readings", |b| {
        b.iter(|| {
            for r in &readings {
                black_box(engine.explain(r));
            }
        })
    });

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    // A year of 10-minute readings
    let history = generate_history(52_560);
    let aggregator = Aggregator::for_display_width(420);

    group.throughput(Throughput::Elements(history.len() as u64));

    for range in TimeRange::ALL {
        group.bench_function(format!("aggregate_{}", range), |b| {
            b.iter(|| black_box(aggregator.aggregate(&history, "temperature", range)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_aggregation);

criterion_main!(benches);
