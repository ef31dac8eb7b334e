use opencrypto::encryption::aead;
use opencrypto::mac;
use opencrypto::hash::DigestAlgorithm;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_seal(c: &mut Criterion) {
    let mut group = c.benchmark_group("chacha20-poly1305 seal");
    let key = [0x11u8; 32];
    let nonce = [0x22u8; 12];

    for size in [64usize, 1024, 16 * 1024] {
        let data = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| aead::seal(&key, &nonce, b"", black_box(data)).unwrap())
        });
    }

    group.finish();
}

pub fn bench_hmac(c: &mut Criterion) {
    c.bench_function("hmac-sha256 1 KiB", |b| {
        let data = [0u8; 1024];
        b.iter(|| mac::hmac(DigestAlgorithm::Sha256, b"key", black_box(&data)).unwrap())
    });
}

criterion_group!(benches, bench_seal, bench_hmac);
criterion_main!(benches);
