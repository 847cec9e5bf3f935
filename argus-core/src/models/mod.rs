mod chunk;
mod hit;
mod raptor_node;

pub use chunk::{Chunk, ChunkMetadata};
pub use hit::Hit;
pub use raptor_node::{NodeMetadata, RaptorNode, SourceRef};
