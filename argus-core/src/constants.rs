/// Argus system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of hits returned by hybrid search.
pub const DEFAULT_TOP_K: usize = 10;

/// Representative entities reported per detected community.
pub const COMMUNITY_REPRESENTATIVES: usize = 6;

/// Provenance sources retained per RAPTOR node.
pub const PROVENANCE_SOURCE_CAP: usize = 8;

/// Chunks shorter than this are excluded from RAPTOR builds.
pub const MIN_RAPTOR_CHUNK_CHARS: usize = 60;
