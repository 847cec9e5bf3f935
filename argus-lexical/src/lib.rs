//! # argus-lexical
//!
//! Term-overlap retrieval independent of embeddings: an incrementally
//! maintained BM25 (Okapi) inverted index. Chunks are added and removed in
//! place; queries never pay O(corpus) rebuild cost.

mod index;
mod tokenizer;

pub use index::LexicalIndex;
pub use tokenizer::tokenize;
