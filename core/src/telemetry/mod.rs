//! telemetry/mod.rs
//! Per-stream telemetry: counters, timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are plain integers owned by one stream; no atomics on the hot path.
//! - Snapshots are serde-serializable for export.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
