// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;
use vault_model::{
    shape::Shape,
    snapshot::{Snapshot, SnapshotBuilder},
};
use vault_safety::checker::SafetyChecker;

/// Builds a random snapshot where every process holds part of its claim.
/// `slack` scales the available vector; small values make long scans with
/// many blocked candidates, large values let almost everyone finish at once.
fn random_snapshot(rng: &mut StdRng, shape: Shape, slack: i64) -> Snapshot<i64> {
    let mut builder = SnapshotBuilder::new(shape);

    for p in shape.processes() {
        for r in shape.resources() {
            let allocation = rng.random_range(0..=5);
            let need = rng.random_range(0..=10);
            builder.set_allocation(p, r, allocation);
            builder.set_claim(p, r, allocation + need);
        }
    }
    for r in shape.resources() {
        builder.set_available(r, rng.random_range(0..=slack));
    }

    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build random snapshot: {}", e))
}

/// Builds a snapshot that is safe only in reverse index order, so every
/// scan has to walk past all blocked processes.
fn staircase_snapshot(num_processes: usize, num_resources: usize) -> Snapshot<i64> {
    let shape = Shape::new(num_processes, num_resources);
    let mut builder = SnapshotBuilder::new(shape);

    for p in shape.processes() {
        let rank = (num_processes - 1 - p.get()) as i64;
        for r in shape.resources() {
            builder.set_allocation(p, r, 1);
            builder.set_claim(p, r, rank + 1);
        }
    }
    // Nothing is available; only the last process needs nothing more.

    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build staircase snapshot: {}", e))
}

fn bench_random_snapshots(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("checker_random");

    for &(num_processes, num_resources) in &[(5, 3), (50, 10), (500, 20)] {
        let shape = Shape::new(num_processes, num_resources);
        let snapshot = random_snapshot(&mut rng, shape, 10);
        let mut checker = SafetyChecker::preallocated(num_processes, num_resources);

        group.throughput(Throughput::Elements(num_processes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", num_processes, num_resources)),
            &snapshot,
            |b, snapshot| b.iter(|| checker.check(black_box(snapshot))),
        );
    }
    group.finish();
}

fn bench_worst_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("checker_staircase");

    for &num_processes in &[10, 100, 1000] {
        let snapshot = staircase_snapshot(num_processes, 4);
        let mut checker = SafetyChecker::preallocated(num_processes, 4);

        let outcome = checker.check(&snapshot);
        if !outcome.is_safe() {
            panic!("Benchmark configuration error: staircase snapshot must be safe.");
        }

        group.throughput(Throughput::Elements(num_processes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_processes),
            &snapshot,
            |b, snapshot| b.iter(|| checker.check(black_box(snapshot))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_random_snapshots, bench_worst_case);
criterion_main!(benches);
