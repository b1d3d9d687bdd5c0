//! zcomp-core
//!
//! Pluggable page-compression backends for a compressed block device.
//! Each backend compresses exactly one page into a caller-owned buffer and
//! decompresses back into exactly one page.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

pub mod compression;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        CompressionBackend, CompressionError, CompressionStream, WorkingState,
    };
    pub use crate::config::ZcompConfig;
    pub use crate::constants::{COMPRESSED_BUFFER_SIZE, PAGE_SIZE};
    pub use crate::types::ZcompError;
}
