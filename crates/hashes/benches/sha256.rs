use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hashes::crypto::Sha256;
use traits::Digest as _;

fn bench_digest(c: &mut Criterion) {
  let mut group = c.benchmark_group("sha256/digest");
  for size in [64usize, 1024, 16 * 1024, 1024 * 1024] {
    let data = vec![0xabu8; size];
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| Sha256::digest(black_box(data)));
    });
  }
  group.finish();
}

fn bench_streaming(c: &mut Criterion) {
  let data = vec![0xcdu8; 64 * 1024];
  let mut group = c.benchmark_group("sha256/streaming");
  group.throughput(Throughput::Bytes(data.len() as u64));
  group.bench_function("64KiB_in_4KiB_writes", |b| {
    b.iter(|| {
      let mut h = Sha256::new();
      for chunk in data.chunks(4096) {
        h.update(black_box(chunk));
      }
      h.finalize()
    });
  });
  group.finish();
}

fn bench_d64_batch(c: &mut Criterion) {
  let mut group = c.benchmark_group("sha256/d64_batch");
  for blocks in [1usize, 2, 4, 8, 32, 256] {
    let input = vec![0x5au8; blocks * 64];
    group.throughput(Throughput::Bytes((blocks * 64) as u64));
    group.bench_with_input(BenchmarkId::from_parameter(blocks), &input, |b, input| {
      let mut out = vec![0u8; input.len() / 2];
      b.iter(|| {
        hashes::sha256_d64(black_box(&mut out), black_box(input), input.len() / 64);
      });
    });
  }
  group.finish();
}

criterion_group!(benches, bench_digest, bench_streaming, bench_d64_batch);
criterion_main!(benches);
