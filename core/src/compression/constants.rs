/// Stable backend names used for runtime selection.
pub mod backend_names {
    pub const LZ4: &str     = "lz4";
    pub const DEFLATE: &str = "deflate";
    pub const ZSTD: &str    = "zstd";
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_DEFLATE: i32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;

/// Valid deflate levels (flate2 accepts 0..=9).
pub const DEFLATE_LEVEL_MIN: i32 = 0;
pub const DEFLATE_LEVEL_MAX: i32 = 9;

/// errno-style code reported when a codec fails without a code of its own.
pub const EINVAL: i32 = 22;

/// LZ4 block format parameters.
pub mod lz4 {
    /// log2 of the working-state size in bytes (`LZ4_MEMORY_USAGE`).
    pub const MEMORY_USAGE: u32 = 14;
    /// Working-state size for one compression (`LZ4_MEM_COMPRESS`).
    pub const MEM_COMPRESS: usize = 1 << MEMORY_USAGE;
    pub const HASH_LOG: u32 = MEMORY_USAGE - 2;
    /// Hash table entries held in the working state (u32 positions).
    pub const HASH_TABLE_ENTRIES: usize = 1 << HASH_LOG;

    pub const MIN_MATCH: usize = 4;
    /// The last literals of a block are never part of a match.
    pub const LAST_LITERALS: usize = 5;
    /// A match may not start closer than this to the end of the block.
    pub const MF_LIMIT: usize = 12;
    pub const MAX_DISTANCE: usize = 65_535;
    /// Inputs shorter than this are emitted as a single literal run.
    pub const MIN_INPUT_FOR_MATCH: usize = MF_LIMIT + 1;

    pub const RUN_MASK: usize = 15;
    pub const ML_MASK: usize = 15;
    /// Larger steps once this many bytes failed to find a match.
    pub const SKIP_TRIGGER: u32 = 6;
}
