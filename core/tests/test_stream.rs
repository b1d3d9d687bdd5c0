// Compression stream tests
//
// * stream owns state + 2 * PAGE_SIZE buffer, compress returns exactly dst_len bytes
// * counters track pages, bytes, expansions and failures
// * independent streams on independent threads share one backend

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use zcomp_core::compression::{
        registry, CompressionBackend, CompressionError, CompressionStream,
    };
    use zcomp_core::constants::PAGE_SIZE;

    // ------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------
    fn stream(name: &str) -> CompressionStream {
        let backend: Arc<dyn CompressionBackend> = Arc::from(registry::create_backend(name, None).unwrap());
        CompressionStream::new(backend).unwrap()
    }

    fn page_for(worker: usize, n: usize) -> Vec<u8> {
        let mut page = vec![(worker * 31 + n) as u8; PAGE_SIZE];
        page[n % PAGE_SIZE] = 0xAB;
        page
    }

    // ------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------
    #[test]
    fn compress_returns_exact_payload() {
        let mut s = stream("lz4");
        let page = vec![0u8; PAGE_SIZE];
        let compressed = s.compress(&page).unwrap().to_vec();
        assert!(compressed.len() <= 64);

        let mut out = vec![1u8; PAGE_SIZE];
        s.decompress(&compressed, &mut out).unwrap();
        assert_eq!(out, page);
    }

    #[test]
    fn counters_follow_traffic() {
        let mut s = stream("lz4");

        let mut random = vec![0u8; PAGE_SIZE];
        StdRng::seed_from_u64(5).fill_bytes(&mut random);
        let expanded_len = s.compress(&random).unwrap().len();
        assert!(expanded_len > PAGE_SIZE);

        let zero_len = s.compress(&[0u8; PAGE_SIZE]).unwrap().len();

        let mut out = vec![0u8; PAGE_SIZE];
        assert!(s.decompress(&[], &mut out).is_err());
        assert!(s.compress(&[0u8; 10]).is_err());

        let c = s.counters();
        assert_eq!(c.pages_compressed, 2);
        assert_eq!(c.pages_expanded, 1);
        assert_eq!(c.bytes_original, 2 * PAGE_SIZE as u64);
        assert_eq!(c.bytes_compressed, (expanded_len + zero_len) as u64);
        assert_eq!(c.compress_failures, 1);
        assert_eq!(c.decompress_failures, 1);
        assert_eq!(c.pages_decompressed, 0);
    }

    #[test]
    fn decompression_failure_is_reported_per_backend() {
        for name in registry::available_backends() {
            let mut s = stream(name);
            let mut out = vec![0u8; PAGE_SIZE];
            let err = s.decompress(&[0xFF; 3], &mut out).unwrap_err();
            assert_eq!(err.backend(), Some(name));
            assert!(matches!(err, CompressionError::DecompressionFailed { .. }));
        }
    }

    #[test]
    fn snapshot_reflects_stream() {
        let mut s = stream("deflate");
        for n in 0..4 {
            s.compress(&page_for(0, n)).unwrap();
        }
        let snap = s.snapshot();
        assert_eq!(snap.backend, "deflate");
        assert_eq!(snap.counters.pages_compressed, 4);
        assert!(snap.compression_ratio > 0.0 && snap.compression_ratio < 0.1);
        assert!(snap.sanity_check());
    }

    #[test]
    fn independent_streams_on_worker_threads() {
        let (tx, rx) = crossbeam::channel::unbounded();

        for name in registry::available_backends() {
            let backend: Arc<dyn CompressionBackend> = Arc::from(registry::create_backend(name, None).unwrap());
            crossbeam::thread::scope(|scope| {
                for worker in 0..4 {
                    let backend = Arc::clone(&backend);
                    let tx = tx.clone();
                    scope.spawn(move |_| {
                        let mut s = CompressionStream::new(backend).unwrap();
                        for n in 0..16 {
                            let page = page_for(worker, n);
                            let compressed = s.compress(&page).unwrap().to_vec();
                            tx.send((name, page, compressed)).unwrap();
                        }
                    });
                }
            })
            .unwrap();
        }
        drop(tx);

        let mut checked = 0;
        for (name, page, compressed) in rx {
            let backend = registry::find(name).unwrap();
            let mut out = vec![0u8; PAGE_SIZE];
            backend.decompress(&compressed, &mut out).unwrap();
            assert_eq!(out, page);
            checked += 1;
        }
        assert_eq!(checked, registry::available_backends().len() * 4 * 16);
    }
}
