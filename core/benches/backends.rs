use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use zcomp_core::compression::registry;
use zcomp_core::constants::{COMPRESSED_BUFFER_SIZE, PAGE_SIZE};

// --- Page generation ---

fn text_page() -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. 0123456789 "
        .iter()
        .cycle()
        .take(PAGE_SIZE)
        .copied()
        .collect()
}

fn random_page() -> Vec<u8> {
    let mut page = vec![0u8; PAGE_SIZE];
    StdRng::seed_from_u64(0x5EED).fill_bytes(&mut page);
    page
}

fn pages() -> Vec<(&'static str, Vec<u8>)> {
    vec![("zero", vec![0u8; PAGE_SIZE]), ("text", text_page()), ("random", random_page())]
}

// --- Benchmark suite ---

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));

    for name in registry::available_backends() {
        let backend = registry::lookup(name).unwrap();
        let mut state = backend.create().unwrap();
        let mut dst = vec![0u8; COMPRESSED_BUFFER_SIZE];

        for (kind, page) in pages() {
            group.bench_with_input(BenchmarkId::new(name, kind), &page, |b, page| {
                b.iter(|| black_box(backend.compress(black_box(page), &mut dst, &mut state).unwrap()))
            });
        }
        backend.destroy(state);
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));

    for name in registry::available_backends() {
        let backend = registry::lookup(name).unwrap();
        let mut state = backend.create().unwrap();
        let mut out = vec![0u8; PAGE_SIZE];

        for (kind, page) in pages() {
            let mut dst = vec![0u8; COMPRESSED_BUFFER_SIZE];
            let len = backend.compress(&page, &mut dst, &mut state).unwrap();
            dst.truncate(len);

            group.bench_with_input(BenchmarkId::new(name, kind), &dst, |b, compressed| {
                b.iter(|| backend.decompress(black_box(compressed), &mut out).unwrap())
            });
        }
        backend.destroy(state);
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
