use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::hint::black_box;
use triagemap::{summarize, summarize_parallel, PredictionRecord, RiskLevel};

fn create_records(count: u64) -> Vec<PredictionRecord> {
    let conditions = ["diabetes", "hypertension", "asthma", "copd", "ckd", "obesity"];
    let created_at = Utc.with_ymd_and_hms(2025, 8, 14, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| PredictionRecord {
            id: i + 1,
            risk_level: RiskLevel::ALL[(i % 3) as usize],
            created_at,
            input_data: Some(json!({
                "age": 20 + i % 70,
                "antecedents": format!(
                    "{}, {}",
                    conditions[(i % 6) as usize],
                    conditions[(i % 4) as usize]
                ),
            })),
        })
        .collect()
}

fn benchmark_summarize(c: &mut Criterion) {
    let records = create_records(50_000);

    c.bench_function("summarize_sequential_50k", |b| {
        b.iter(|| black_box(summarize(black_box(&records), 3)))
    });

    c.bench_function("summarize_parallel_50k", |b| {
        b.iter(|| black_box(summarize_parallel(black_box(&records), 3)))
    });
}

criterion_group!(benches, benchmark_summarize);
criterion_main!(benches);
