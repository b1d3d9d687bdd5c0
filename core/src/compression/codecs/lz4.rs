//! codecs/lz4.rs
//! LZ4 page backend over the numeric block interface.
use crate::compression::codecs::lz4_block::{compress_default, decompress_safe};
use crate::compression::constants::{backend_names, lz4::HASH_TABLE_ENTRIES};
use crate::compression::types::{
    alloc_zeroed, compress_window, page_window, CompressionBackend, CompressionError, Scratch,
    WorkingState,
};
use crate::constants::PAGE_SIZE;

/// LZ4 backend. The working state is the encoder's hash table
/// (`LZ4_MEM_COMPRESS` bytes); decompression needs no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Backend;

impl Lz4Backend {
    pub const fn new() -> Self {
        Self
    }
}

impl CompressionBackend for Lz4Backend {
    fn name(&self) -> &'static str {
        backend_names::LZ4
    }

    fn create(&self) -> Result<WorkingState, CompressionError> {
        let table = alloc_zeroed::<u32>(self.name(), HASH_TABLE_ENTRIES)?;
        log::debug!("lz4: created working state ({} hash slots)", table.len());
        Ok(WorkingState::new(self.name(), Scratch::HashTable(table)))
    }

    fn compress(
        &self,
        src: &[u8],
        dst: &mut [u8],
        state: &mut WorkingState,
    ) -> Result<usize, CompressionError> {
        let backend = self.name();
        let window = compress_window(backend, src, dst)?;
        let table = state.hash_table(backend)?;

        let out_len = compress_default(src, window, table);
        if out_len == 0 {
            log::trace!("lz4: compress_default returned 0");
            return Err(CompressionError::CompressionFailed { backend, code: 0 });
        }
        Ok(out_len)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<(), CompressionError> {
        let backend = self.name();
        let page = page_window(backend, dst)?;
        match decompress_safe(src, page) {
            n if n == PAGE_SIZE as isize => Ok(()),
            n => {
                log::trace!("lz4: decompress_safe returned {n} for {} input bytes", src.len());
                Err(CompressionError::DecompressionFailed { backend })
            }
        }
    }
}
