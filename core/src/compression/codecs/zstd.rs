//! src/compression/codecs/zstd.rs
//!
//! Zstd page backend.
//!
//! Design notes:
//! - The working state is a `zstd::bulk::Compressor`; its context is created
//!   once with the configured level and reused for every page.
//! - Decompression uses a one-shot context per call, dropped before return.
//! - Library errors are mapped into `CompressionError` with backend context.

use crate::compression::constants::{backend_names, DEFAULT_LEVEL_ZSTD, EINVAL};
use crate::compression::types::{
    compress_window, page_window, CompressionBackend, CompressionError, Scratch, WorkingState,
};
use crate::constants::PAGE_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct ZstdBackend {
    level: i32,
}

impl ZstdBackend {
    /// `level` must lie within `zstd::compression_level_range()`.
    pub const fn new(level: i32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdBackend {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_ZSTD)
    }
}

impl CompressionBackend for ZstdBackend {
    fn name(&self) -> &'static str {
        backend_names::ZSTD
    }

    /// # Errors
    /// - `OutOfMemory` if the compression context cannot be created.
    fn create(&self) -> Result<WorkingState, CompressionError> {
        let context = zstd::bulk::Compressor::new(self.level).map_err(|e| {
            log::debug!("zstd: context creation failed: {e}");
            CompressionError::OutOfMemory { backend: self.name() }
        })?;
        log::debug!("zstd: created working state (level {})", self.level);
        Ok(WorkingState::new(self.name(), Scratch::Zstd(Box::new(context))))
    }

    fn compress(
        &self,
        src: &[u8],
        dst: &mut [u8],
        state: &mut WorkingState,
    ) -> Result<usize, CompressionError> {
        let backend = self.name();
        let window = compress_window(backend, src, dst)?;
        let context = state.zstd(backend)?;

        match context.compress_to_buffer(src, window) {
            Ok(written) if written > 0 => Ok(written),
            Ok(_) => Err(CompressionError::CompressionFailed { backend, code: 0 }),
            Err(e) => {
                log::trace!("zstd: {e}");
                Err(CompressionError::CompressionFailed { backend, code: -EINVAL })
            }
        }
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CompressionError> {
        let backend = self.name();
        let page = page_window(backend, dst)?;

        match zstd::bulk::decompress_to_buffer(src, page) {
            Ok(written) if written == PAGE_SIZE => Ok(()),
            Ok(written) => {
                log::trace!("zstd: decoded {written} bytes, expected {PAGE_SIZE}");
                Err(CompressionError::DecompressionFailed { backend })
            }
            Err(e) => {
                log::trace!("zstd: {e}");
                Err(CompressionError::DecompressionFailed { backend })
            }
        }
    }
}
