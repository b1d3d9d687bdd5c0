//! Raw deflate via flate2. The working state is a resettable compression
//! stream, so a call reuses its window and hash chains instead of allocating.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

use crate::compression::constants::{backend_names, DEFAULT_LEVEL_DEFLATE, EINVAL};
use crate::compression::types::{
    compress_window, page_window, CompressionBackend, CompressionError, Scratch, WorkingState,
};
use crate::constants::PAGE_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct DeflateBackend {
    level: u32,
}

impl DeflateBackend {
    /// `level` must already be within 0..=9.
    pub const fn new(level: u32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for DeflateBackend {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_DEFLATE as u32)
    }
}

impl CompressionBackend for DeflateBackend {
    fn name(&self) -> &'static str {
        backend_names::DEFLATE
    }

    fn create(&self) -> Result<WorkingState, CompressionError> {
        let stream = Compress::new(Compression::new(self.level), false);
        log::debug!("deflate: created working state (level {})", self.level);
        Ok(WorkingState::new(self.name(), Scratch::Deflate(Box::new(stream))))
    }

    fn compress(
        &self,
        src: &[u8],
        dst: &mut [u8],
        state: &mut WorkingState,
    ) -> Result<usize, CompressionError> {
        let backend = self.name();
        let window = compress_window(backend, src, dst)?;
        let stream = state.deflate(backend)?;

        stream.reset();
        match stream.compress(src, window, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => Ok(stream.total_out() as usize),
            Ok(status) => {
                log::trace!("deflate: stream ended early ({status:?}) after {} bytes", stream.total_out());
                Err(CompressionError::CompressionFailed { backend, code: -EINVAL })
            }
            Err(e) => {
                log::trace!("deflate: {e}");
                Err(CompressionError::CompressionFailed { backend, code: -EINVAL })
            }
        }
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CompressionError> {
        let backend = self.name();
        let page = page_window(backend, dst)?;

        // Inflate keeps no state between pages; the context lives for this call only.
        let mut stream = Decompress::new(false);
        match stream.decompress(src, page, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) if stream.total_out() as usize == PAGE_SIZE => Ok(()),
            Ok(status) => {
                log::trace!(
                    "deflate: inflate stopped with {status:?} after {} bytes",
                    stream.total_out()
                );
                Err(CompressionError::DecompressionFailed { backend })
            }
            Err(e) => {
                log::trace!("deflate: {e}");
                Err(CompressionError::DecompressionFailed { backend })
            }
        }
    }
}
