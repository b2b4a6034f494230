//! Benchmarks for Pulsehub store ingestion and query performance

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pulsehub::{NewReading, ReadingMetadata, SensorType, TelemetryStore};

fn generate_drafts(count: usize) -> Vec<NewReading> {
    (0..count)
        .map(|i| {
            let sensor_type = SensorType::ALL[i % SensorType::ALL.len()];
            NewReading {
                sensor_id: format!("{}-{:02}", sensor_type, i % 8),
                sensor_type,
                value: 20.0 + (i as f64 % 10.0) * 0.1,
                unit: sensor_type.unit().to_string(),
                metadata: ReadingMetadata::default(),
            }
        })
        .collect()
}

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");

    let drafts = generate_drafts(1000);
    group.throughput(Throughput::Elements(1000));

    group.bench_function("add_1000_readings", |b| {
        b.iter(|| {
            let mut store = TelemetryStore::new();
            for draft in &drafts {
                let reading = store.add_reading(draft.clone());
                black_box(reading);
            }
        })
    });

    // Full window: every insert also evicts
    group.bench_function("add_1000_readings_with_eviction", |b| {
        let mut store = TelemetryStore::new();
        for draft in &drafts {
            store.add_reading(draft.clone());
        }
        b.iter(|| {
            for draft in &drafts {
                let reading = store.add_reading(draft.clone());
                black_box(reading);
            }
        })
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let mut store = TelemetryStore::new();
    for draft in generate_drafts(1000) {
        store.add_reading(draft);
    }

    group.bench_function("recent_50_filtered", |b| {
        b.iter(|| {
            let readings = store.recent_readings(50, Some(SensorType::Temperature));
            black_box(readings);
        })
    });

    group.bench_function("statistics", |b| {
        b.iter(|| {
            let stats = store.statistics();
            black_box(stats);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_ingestion, bench_queries);
criterion_main!(benches);
