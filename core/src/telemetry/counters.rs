//! telemetry/counters.rs
//! Mutable counters kept by a compression stream.
//!
//! Summary: page and byte counts for compress/decompress, plus failures.
//! Converted into an immutable TelemetrySnapshot on demand.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::PAGE_SIZE;

/// Deterministic counters collected per stream.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub pages_compressed: u64,
    pub pages_decompressed: u64,
    /// Pages whose compressed form came out larger than a page.
    pub pages_expanded: u64,
    pub bytes_original: u64,
    pub bytes_compressed: u64,
    pub compress_failures: u64,
    pub decompress_failures: u64,
}

impl TelemetryCounters {
    /// Record one successful compression.
    pub fn add_compress(&mut self, compressed_len: usize) {
        self.pages_compressed += 1;
        self.bytes_original += PAGE_SIZE as u64;
        self.bytes_compressed += compressed_len as u64;
        if compressed_len > PAGE_SIZE {
            self.pages_expanded += 1;
        }
    }

    pub fn add_decompress(&mut self) {
        self.pages_decompressed += 1;
    }

    pub fn add_compress_failure(&mut self) {
        self.compress_failures += 1;
    }

    pub fn add_decompress_failure(&mut self) {
        self.decompress_failures += 1;
    }

    /// Bytes saved by compression so far (zero if the data grew).
    pub fn bytes_saved(&self) -> u64 {
        self.bytes_original.saturating_sub(self.bytes_compressed)
    }

    // Streams keep private counters; the owner merges them when reporting.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.pages_compressed += other.pages_compressed;
        self.pages_decompressed += other.pages_decompressed;
        self.pages_expanded += other.pages_expanded;
        self.bytes_original += other.bytes_original;
        self.bytes_compressed += other.bytes_compressed;
        self.compress_failures += other.compress_failures;
        self.decompress_failures += other.decompress_failures;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
