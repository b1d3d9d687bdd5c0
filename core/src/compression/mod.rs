//! compression/mod.rs
//! Page compression backends behind one contract.
//!
//! Notes:
//! - Backends are immutable, shareable descriptors; all mutable memory lives
//!   in caller-owned working states.
//! - Compression always advertises a `2 * PAGE_SIZE` output capacity.
//! - Decompression writes exactly one page or fails.
//! - The registry resolves backend names to implementations.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod stream;

pub use constants::backend_names;
pub use types::{CompressionBackend, CompressionError, WorkingState};
pub use registry::{
    available_backends, available_show, create_backend, find, is_available, lookup, resolve,
    BackendInfo,
};
pub use codecs::{DeflateBackend, Lz4Backend, ZstdBackend};
pub use stream::CompressionStream;
