//! Criterion bench for the two-pass external sort.
//!
//! Input scores are deterministic across runs (LCG-based) so results are
//! comparable over time. Throughput is reported in rows.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use rocpr_frame::{ColumnType, DataFrame, FrameConfig, Schema, Value};
use tempfile::TempDir;

/// Deterministic pseudo-random scores in [0, 1), stable across runs.
fn det_scores(n: usize, seed: u64) -> Vec<f64> {
    const A: u64 = 6_364_136_223_846_793_005;
    const C: u64 = 1_442_695_040_888_963_407;

    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(A).wrapping_add(C);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn build_frame(scores: &[f64], block_bytes: usize) -> (TempDir, DataFrame) {
    let dir = TempDir::new().unwrap();
    let schema = Schema::new(vec![ColumnType::Int32, ColumnType::Double]).unwrap();
    let mut frame = DataFrame::with_config(
        schema,
        FrameConfig {
            block_bytes,
            backing_path: dir.path().join("scratch"),
        },
    )
    .unwrap();
    for (i, &score) in scores.iter().enumerate() {
        frame
            .insert_row(&[Value::Int32(i as i32), Value::Double(score)])
            .unwrap();
    }
    (dir, frame)
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("external_sort");

    let n = 8192usize;
    let scores = det_scores(n, 2024);
    group.throughput(Throughput::Elements(n as u64));

    // One resident run vs. a fan-in of on-disk runs.
    for &(label, block_bytes) in &[("single_run", 1 << 20), ("many_runs", 8192)] {
        group.bench_function(BenchmarkId::new("sort_by_score", label), |b| {
            b.iter_batched(
                || build_frame(&scores, block_bytes),
                |(dir, mut frame)| {
                    frame.sort_by(black_box(&[1])).unwrap();
                    drop(frame);
                    drop(dir);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
