use std::io;

use thiserror::Error;

use crate::{compression::CompressionError, config::ConfigError};

/// Unified error covering backends, configuration and I/O.
/// - `From<T>` impls enable `?` across modules.
#[derive(Debug, Error)]
pub enum ZcompError {
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
