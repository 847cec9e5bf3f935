//! Default values shared by the config structs.

pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

// Retrieval
pub const DEFAULT_VECTOR_CANDIDATES: usize = 60;
pub const DEFAULT_LEXICAL_CANDIDATES: usize = 200;
pub const DEFAULT_PRELIM_POOL: usize = 80;
pub const DEFAULT_GRAPH_SCORE_WEIGHT: f64 = 0.8;
pub const DEFAULT_USE_GRAPH_BIAS: bool = true;
pub const DEFAULT_RECENT_DAYS: u32 = 30;
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 260;
pub const DEFAULT_EMBED_CACHE_ENTRIES: u64 = 2048;

// Graph
pub const DEFAULT_GRAPH_PATH: &str = ".graph/argus_graph.json";
pub const DEFAULT_MAX_PAIRS_PER_CHUNK: usize = 15;
pub const DEFAULT_DOC_BOOST_LIMIT: usize = 300;

// RAPTOR
pub const DEFAULT_RAPTOR_MIN_DOCS: usize = 50;
pub const DEFAULT_RAPTOR_MAX_DOCS: usize = 1000;
pub const DEFAULT_TARGET_CLUSTER_SIZE: usize = 24;
pub const DEFAULT_K_MAX: usize = 30;
pub const DEFAULT_CHUNKS_PER_NODE: usize = 50;
pub const DEFAULT_WORKING_SET_CAP: usize = 500;
