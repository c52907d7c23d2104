//! TLS option performance benchmarks
//!
//! This benchmark suite measures:
//! - Setting options on a fresh record
//! - Exporting a populated record into an option snapshot
//! - Replaying a snapshot onto a new record
//!
//! Run with: cargo bench --bench options_performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tlsio_options::tls::{
    apply_option, destroy_value, duplicate_value, Capabilities, TlsOptions, OPTION_TRUSTED_CERTS,
    OPTION_X509_CERT, OPTION_X509_KEY,
};

fn pem_blob(len: usize) -> String {
    let mut blob = String::from("-----BEGIN CERTIFICATE-----\n");
    while blob.len() < len {
        blob.push_str("MIIDwzCCAqugAwIBAgIUe4v+PgBZeohddbh92DAKmy8N6nAwDQYJKoZIhvcNAQEL\n");
    }
    blob.push_str("-----END CERTIFICATE-----\n");
    blob
}

fn populated(blob: &str) -> TlsOptions {
    let mut options = TlsOptions::new(Capabilities::all());
    options.set(OPTION_TRUSTED_CERTS, blob).unwrap();
    options.set(OPTION_X509_CERT, blob).unwrap();
    options.set(OPTION_X509_KEY, blob).unwrap();
    options
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for size in [1024usize, 16 * 1024] {
        let blob = pem_blob(size);
        group.throughput(Throughput::Bytes((blob.len() * 3) as u64));
        group.bench_with_input(BenchmarkId::new("all_options", size), &blob, |b, blob| {
            b.iter(|| {
                let options = populated(black_box(blob));
                black_box(options);
            });
        });
    }

    group.bench_function("unhandled_name", |b| {
        let mut options = TlsOptions::new(Capabilities::all());
        b.iter(|| {
            let result = options.set(black_box("HttpProxy"), black_box("proxy"));
            black_box(result.is_err());
        });
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let options = populated(&pem_blob(4096));

    group.bench_function("retrieve", |b| {
        b.iter(|| {
            let handler = options
                .retrieve_options(duplicate_value, destroy_value, apply_option)
                .unwrap();
            black_box(handler);
        });
    });

    let handler = options
        .retrieve_options(duplicate_value, destroy_value, apply_option)
        .unwrap();
    group.bench_function("replay", |b| {
        b.iter(|| {
            let mut target = TlsOptions::new(Capabilities::all());
            handler.feed_options(&mut target).unwrap();
            black_box(target);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_snapshot);
criterion_main!(benches);
