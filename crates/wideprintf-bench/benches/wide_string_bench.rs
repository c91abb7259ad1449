//! Wide-string helper benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use wideprintf_bench::wide_text;
use wideprintf_core::stdlib::wcstoul;
use wideprintf_core::string::{from_wide, to_wide, wcslen};

fn bench_wcslen(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 256, 4096];
    let mut group = c.benchmark_group("wcslen");
    for &size in sizes {
        let text = wide_text('a', size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(wcslen(black_box(&text))));
        });
    }
    group.finish();
}

fn bench_from_wide(c: &mut Criterion) {
    let text = wide_text('z', 1024);
    c.bench_function("from_wide_1024", |b| {
        b.iter(|| black_box(from_wide(black_box(&text))));
    });
}

fn bench_wcstoul(c: &mut Criterion) {
    let hex = to_wide("0xdeadbeef");
    c.bench_function("wcstoul_hex", |b| {
        b.iter(|| black_box(wcstoul(black_box(&hex), 0)));
    });
}

criterion_group!(benches, bench_wcslen, bench_from_wide, bench_wcstoul);
criterion_main!(benches);
