//! telemetry/snapshot.rs
//! Immutable view of a stream's counters and timings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Counters, ratios, throughput and stage timings at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub backend: String,
    pub counters: TelemetryCounters,
    /// `bytes_compressed / bytes_original`; may exceed 1.0 for incompressible data.
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(backend: &str, counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_original > 0 {
            counters.bytes_compressed as f64 / counters.bytes_original as f64
        } else {
            0.0
        };

        let busy = timer.stage_times.get(Stage::Compress).as_secs_f64();
        let throughput_bytes_per_sec = if busy > 0.0 {
            counters.bytes_original as f64 / busy
        } else {
            0.0
        };

        Self {
            backend: backend.to_string(),
            counters: counters.clone(),
            compression_ratio,
            throughput_bytes_per_sec,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Internal invariants:
    /// - stage time never exceeds wall time
    /// - expanded pages are a subset of compressed pages
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed
            && self.counters.pages_expanded <= self.counters.pages_compressed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
