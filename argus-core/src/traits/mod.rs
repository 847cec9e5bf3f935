//! Seams to the external collaborators the core consumes.

mod cross_encoder;
mod embedding;
mod extractor;
mod store;
mod summarizer;

pub use cross_encoder::ICrossEncoder;
pub use embedding::IEmbedder;
pub use extractor::IEntityExtractor;
pub use store::{IVectorStore, ScoredRecord, StoredRecord, VectorRecord};
pub use summarizer::ISummarizer;
