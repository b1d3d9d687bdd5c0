/// Size of one uncompressed page. The device never stores partial pages.
pub const PAGE_SIZE: usize = 4096;

/// Capacity of the compressed output buffer every caller must provide.
///
/// Backends are always told this much room is available, even though a
/// useful payload normally fits in `PAGE_SIZE`. Some algorithms pad their
/// output and fail outright when told a tighter capacity; the device layer
/// decides afterwards whether an oversized result is still worth storing.
pub const COMPRESSED_BUFFER_SIZE: usize = 2 * PAGE_SIZE;

/// Backend selected when no configuration says otherwise.
pub const DEFAULT_ALGORITHM: &str = "lz4";
