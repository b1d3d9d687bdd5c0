//! compression/stream.rs
//! One execution context's compression resources.
//!
//! A stream owns a working state and the `COMPRESSED_BUFFER_SIZE` output
//! buffer, both allocated up front, so steady-state compression allocates
//! nothing. Pooling streams across workers is the device layer's job.
use std::fmt;
use std::sync::Arc;

use crate::compression::types::{alloc_zeroed, CompressionBackend, CompressionError, WorkingState};
use crate::constants::COMPRESSED_BUFFER_SIZE;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};

pub struct CompressionStream {
    backend: Arc<dyn CompressionBackend>,
    // Always `Some` until drop hands it back to the backend.
    state: Option<WorkingState>,
    buffer: Box<[u8]>,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl CompressionStream {
    /// Allocate the working state and output buffer for `backend`.
    ///
    /// # Errors
    /// - `OutOfMemory` if either allocation fails.
    pub fn new(backend: Arc<dyn CompressionBackend>) -> Result<Self, CompressionError> {
        let mut timer = TelemetryTimer::new();
        let state = timer.time(Stage::Create, || backend.create())?;
        let buffer = match alloc_zeroed::<u8>(backend.name(), COMPRESSED_BUFFER_SIZE) {
            Ok(buffer) => buffer,
            Err(e) => {
                backend.destroy(state);
                return Err(e);
            }
        };
        log::debug!("{}: stream ready", backend.name());

        Ok(Self {
            backend,
            state: Some(state),
            buffer,
            counters: TelemetryCounters::default(),
            timer,
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn backend(&self) -> &Arc<dyn CompressionBackend> {
        &self.backend
    }

    /// Compress one page; the returned slice holds exactly the compressed bytes.
    ///
    /// The slice may be longer than `PAGE_SIZE`. Whether such a page is
    /// stored compressed is up to the caller.
    pub fn compress(&mut self, page: &[u8]) -> Result<&[u8], CompressionError> {
        let Self { backend, state, buffer, counters, timer } = self;
        let Some(state) = state.as_mut() else {
            return Err(CompressionError::OutOfMemory { backend: backend.name() });
        };

        let result = timer.time(Stage::Compress, || backend.compress(page, buffer, state));
        match result {
            Ok(len) => {
                counters.add_compress(len);
                Ok(&buffer[..len])
            }
            Err(e) => {
                counters.add_compress_failure();
                Err(e)
            }
        }
    }

    /// Decompress `src` into the first `PAGE_SIZE` bytes of `dst`.
    pub fn decompress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<(), CompressionError> {
        let backend = &self.backend;
        let result = self.timer.time(Stage::Decompress, || backend.decompress(src, dst));
        match result {
            Ok(()) => self.counters.add_decompress(),
            Err(_) => self.counters.add_decompress_failure(),
        }
        result
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(self.backend.name(), &self.counters, &self.timer)
    }
}

impl Drop for CompressionStream {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.backend.destroy(state);
        }
    }
}

impl fmt::Debug for CompressionStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionStream")
            .field("backend", &self.backend.name())
            .field("state", &self.state)
            .field("counters", &self.counters)
            .finish()
    }
}
