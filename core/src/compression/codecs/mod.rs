//! compression/codecs/mod.rs
//! Page backends, one module per algorithm.
//!
//! - Every backend validates buffer sizes the same way and advertises the
//!   full compressed-buffer capacity to its library.
//! - `lz4_block` is the numeric-return block layer the LZ4 backend adapts.

pub mod deflate;
pub mod lz4;
pub mod lz4_block;
pub mod zstd;

pub use self::deflate::DeflateBackend;
pub use self::lz4::Lz4Backend;
pub use self::zstd::ZstdBackend;
