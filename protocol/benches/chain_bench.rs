// Chain benchmarks for the Starledger protocol.
//
// Covers record appends on chains of increasing length (each append
// re-validates the whole chain) and standalone full-chain validation.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use starledger_protocol::storage::{validate_records, Ledger};
use starledger_protocol::SystemClock;

fn ledger_with(n: usize) -> Ledger {
    let ledger = Ledger::new(Arc::new(SystemClock));
    for i in 0..n {
        ledger.append(&i).expect("append");
    }
    ledger
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/append");

    for size in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let ledger = ledger_with(size);
            b.iter(|| ledger.append(&"payload").expect("append"));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/validate");

    for size in [10usize, 100, 1_000] {
        let records = ledger_with(size).records();
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| validate_records(records));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_validate);
criterion_main!(benches);
