//! telemetry/timers.rs
//! Stage timers for compression streams.
//!
//! Summary: per-stage accumulated durations and call counts for working-state
//! creation, compression and decompression. Storage is a fixed array, so
//! timing a page never allocates.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Create,
    Compress,
    Decompress,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Create, Stage::Compress, Stage::Decompress];

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Create     => "create",
            Stage::Compress   => "compress",
            Stage::Decompress => "decompress",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimes {
    times: [Duration; 3],
    calls: [u64; 3],
}

impl StageTimes {
    /// Charge one call of `dur` to `stage`.
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        self.times[stage.slot()] += dur;
        self.calls[stage.slot()] += 1;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times[stage.slot()]
    }

    /// Duration in microseconds (f64).
    pub fn get_us(&self, stage: Stage) -> f64 {
        self.get(stage).as_secs_f64() * 1_000_000.0
    }

    /// Number of timed calls for `stage`.
    pub fn calls(&self, stage: Stage) -> u64 {
        self.calls[stage.slot()]
    }

    /// Mean duration per call, zero if the stage never ran.
    pub fn mean(&self, stage: Stage) -> Duration {
        match self.calls(stage) {
            0 => Duration::ZERO,
            n => Duration::from_nanos((self.get(stage).as_nanos() / u128::from(n)) as u64),
        }
    }

    pub fn total(&self) -> Duration {
        self.times.iter().sum()
    }

    /// True when every stage in `expected` was timed at least once.
    pub fn has_all(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.calls(*s) > 0)
    }

    /// Stages that ran, with their accumulated time.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Duration)> + '_ {
        Stage::ALL
            .into_iter()
            .filter(|s| self.calls(*s) > 0)
            .map(|s| (s, self.get(s)))
    }

    pub fn merge(&mut self, other: &StageTimes) {
        for stage in Stage::ALL {
            self.times[stage.slot()] += other.times[stage.slot()];
            self.calls[stage.slot()] += other.calls[stage.slot()];
        }
    }
}

#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub stage_times: StageTimes,
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            stage_times: StageTimes::default(),
        }
    }

    pub fn add_stage_time(&mut self, stage: Stage, dur: Duration) {
        self.stage_times.add(stage, dur);
    }

    /// Run `f`, charging its wall time to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = f();
        self.add_stage_time(stage, started.elapsed());
        out
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}
