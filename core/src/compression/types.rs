//! compression/types.rs
//! Backend contract, working state and error taxonomy.
use std::fmt;

use thiserror::Error;

use crate::constants::{COMPRESSED_BUFFER_SIZE, PAGE_SIZE};

/// Failures surfaced by a backend. Every variant names the backend it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// The working state could not be allocated. The instance must not be used.
    #[error("{backend}: cannot allocate working state")]
    OutOfMemory { backend: &'static str },

    /// The algorithm reported an internal failure while compressing.
    #[error("{backend}: compression failed (code {code})")]
    CompressionFailed { backend: &'static str, code: i32 },

    /// Corrupt, truncated or size-mismatched input. Retrying cannot help.
    #[error("{backend}: decompression failed")]
    DecompressionFailed { backend: &'static str },

    /// A caller buffer violates the page sizing contract.
    #[error("{backend}: buffer holds {have} bytes, contract requires {need}")]
    BufferTooSmall { backend: &'static str, have: usize, need: usize },

    /// The working state was created by another backend.
    #[error("working state belongs to {found}, not {expected}")]
    StateMismatch { expected: &'static str, found: &'static str },

    #[error("unsupported compression backend: {name:?}")]
    UnsupportedBackend { name: String },
}

impl CompressionError {
    /// Name of the backend that raised the error, if any.
    pub fn backend(&self) -> Option<&str> {
        use CompressionError::*;
        match self {
            OutOfMemory { backend }
            | CompressionFailed { backend, .. }
            | DecompressionFailed { backend }
            | BufferTooSmall { backend, .. } => Some(backend),
            StateMismatch { expected, .. } => Some(expected),
            UnsupportedBackend { .. } => None,
        }
    }
}

/// Scratch memory owned by a [`WorkingState`]. Each backend keeps its own kind.
pub(crate) enum Scratch {
    /// LZ4 match-finder hash table (`LZ4_MEM_COMPRESS` bytes).
    HashTable(Box<[u32]>),
    Deflate(Box<flate2::Compress>),
    Zstd(Box<zstd::bulk::Compressor<'static>>),
}

/// Per-instance scratch memory, created by [`CompressionBackend::create`].
///
/// The value is move-only: [`CompressionBackend::destroy`] consumes it, and
/// compression borrows it mutably, so one state can never serve two
/// concurrent calls.
pub struct WorkingState {
    backend: &'static str,
    scratch: Scratch,
}

impl WorkingState {
    pub(crate) fn new(backend: &'static str, scratch: Scratch) -> Self {
        Self { backend, scratch }
    }

    /// Name of the backend that created this state.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Size of the raw scratch table, for backends that keep one.
    pub fn scratch_bytes(&self) -> Option<usize> {
        match &self.scratch {
            Scratch::HashTable(table) => Some(table.len() * std::mem::size_of::<u32>()),
            Scratch::Deflate(_) | Scratch::Zstd(_) => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> CompressionError {
        CompressionError::StateMismatch { expected, found: self.backend }
    }

    /// The LZ4 hash table, if this state was created by `expected`.
    pub(crate) fn hash_table(&mut self, expected: &'static str) -> Result<&mut [u32], CompressionError> {
        let err = self.mismatch(expected);
        match &mut self.scratch {
            Scratch::HashTable(table) if self.backend == expected => Ok(&mut table[..]),
            _ => Err(err),
        }
    }

    pub(crate) fn deflate(
        &mut self,
        expected: &'static str,
    ) -> Result<&mut flate2::Compress, CompressionError> {
        let err = self.mismatch(expected);
        match &mut self.scratch {
            Scratch::Deflate(stream) if self.backend == expected => Ok(stream.as_mut()),
            _ => Err(err),
        }
    }

    pub(crate) fn zstd(
        &mut self,
        expected: &'static str,
    ) -> Result<&mut zstd::bulk::Compressor<'static>, CompressionError> {
        let err = self.mismatch(expected);
        match &mut self.scratch {
            Scratch::Zstd(context) if self.backend == expected => Ok(context.as_mut()),
            _ => Err(err),
        }
    }
}

impl fmt::Debug for WorkingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkingState")
            .field("backend", &self.backend)
            .field("scratch_bytes", &self.scratch_bytes())
            .finish()
    }
}

/// A named compression algorithm operating on single pages.
///
/// Descriptors are immutable and shared by any number of callers; all
/// mutable memory lives in the caller-owned [`WorkingState`].
pub trait CompressionBackend: Send + Sync {
    /// Unique name used for runtime selection (e.g. `"lz4"`).
    fn name(&self) -> &'static str;

    /// Allocate zeroed working memory sized for compressing one page.
    fn create(&self) -> Result<WorkingState, CompressionError>;

    /// Release a working state.
    fn destroy(&self, state: WorkingState) {
        log::debug!("{}: destroying working state", self.name());
        drop(state);
    }

    /// Compress one page into `dst` and return the number of valid bytes.
    ///
    /// `src` must be exactly `PAGE_SIZE` bytes and `dst` at least
    /// `COMPRESSED_BUFFER_SIZE`. The full `COMPRESSED_BUFFER_SIZE` is
    /// advertised to the algorithm; the result may exceed `PAGE_SIZE`.
    fn compress(
        &self,
        src: &[u8],
        dst: &mut [u8],
        state: &mut WorkingState,
    ) -> Result<usize, CompressionError>;

    /// Decompress `src` into exactly `PAGE_SIZE` bytes at the front of `dst`.
    ///
    /// Nothing past `dst[..PAGE_SIZE]` is ever written. On error the
    /// contents of `dst` are unspecified.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CompressionError>;
}

impl fmt::Debug for dyn CompressionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressionBackend").field("name", &self.name()).finish()
    }
}

/// Check the compress-side buffers and return the advertised output window.
pub(crate) fn compress_window<'a>(
    backend: &'static str,
    src: &[u8],
    dst: &'a mut [u8],
) -> Result<&'a mut [u8], CompressionError> {
    if src.len() != PAGE_SIZE {
        return Err(CompressionError::BufferTooSmall { backend, have: src.len(), need: PAGE_SIZE });
    }
    if dst.len() < COMPRESSED_BUFFER_SIZE {
        return Err(CompressionError::BufferTooSmall {
            backend,
            have: dst.len(),
            need: COMPRESSED_BUFFER_SIZE,
        });
    }
    Ok(&mut dst[..COMPRESSED_BUFFER_SIZE])
}

/// Check the decompress-side buffer and return the page window.
pub(crate) fn page_window<'a>(
    backend: &'static str,
    dst: &'a mut [u8],
) -> Result<&'a mut [u8], CompressionError> {
    if dst.len() < PAGE_SIZE {
        return Err(CompressionError::BufferTooSmall { backend, have: dst.len(), need: PAGE_SIZE });
    }
    Ok(&mut dst[..PAGE_SIZE])
}

/// Fallible zeroed allocation, mapped to `OutOfMemory`.
pub(crate) fn alloc_zeroed<T: Default + Clone>(
    backend: &'static str,
    len: usize,
) -> Result<Box<[T]>, CompressionError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| CompressionError::OutOfMemory { backend })?;
    buf.resize(len, T::default());
    Ok(buf.into_boxed_slice())
}
