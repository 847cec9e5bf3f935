use std::sync::{Arc, RwLock};

use argus_core::config::ArgusConfig;
use argus_core::errors::{ArgusResult, StoreError};
use argus_core::traits::{
    ICrossEncoder, IEmbedder, IEntityExtractor, ISummarizer, IVectorStore, VectorRecord,
};
use argus_core::{Chunk, ChunkMetadata, Hit};
use argus_graph::{Community, EntityRank, GraphStore};
use argus_lexical::LexicalIndex;
use argus_raptor::{query_nodes, BuildOutcome, CancelToken, NodeHit, RaptorBuilder};
use argus_retrieval::HybridRanker;
use tracing::{debug, info};

/// The engine owns all shared state and exposes the full operation surface:
/// ingestion, hybrid search, RAPTOR builds and queries, and graph reads.
pub struct ArgusEngine {
    chunks: Arc<dyn IVectorStore>,
    nodes: Arc<dyn IVectorStore>,
    graph: Arc<RwLock<GraphStore>>,
    lexical: Arc<RwLock<LexicalIndex>>,
    embedder: Arc<dyn IEmbedder>,
    extractor: Arc<dyn IEntityExtractor>,
    ranker: HybridRanker,
    raptor: RaptorBuilder,
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Backend {
        reason: format!("{what} lock poisoned"),
    }
}

impl ArgusEngine {
    /// Wire the engine together. Loads the persisted graph, seeds the
    /// lexical index from the chunk store, and rejects collaborators whose
    /// embedding-model identity disagrees with the collections.
    pub fn new(
        chunks: Arc<dyn IVectorStore>,
        nodes: Arc<dyn IVectorStore>,
        embedder: Arc<dyn IEmbedder>,
        cross_encoder: Arc<dyn ICrossEncoder>,
        extractor: Arc<dyn IEntityExtractor>,
        summarizer: Arc<dyn ISummarizer>,
        config: ArgusConfig,
    ) -> ArgusResult<Self> {
        for collection in [&chunks, &nodes] {
            if collection.embedding_model() != embedder.name() {
                return Err(StoreError::ModelMismatch {
                    expected: collection.embedding_model().to_string(),
                    got: embedder.name().to_string(),
                }
                .into());
            }
        }
        if !config.embedding_model.is_empty() && config.embedding_model != embedder.name() {
            return Err(StoreError::ModelMismatch {
                expected: config.embedding_model.clone(),
                got: embedder.name().to_string(),
            }
            .into());
        }

        let graph = Arc::new(RwLock::new(GraphStore::load(&config.graph)));

        let mut index = LexicalIndex::new();
        let seeded = chunks.fetch_all(None)?;
        for record in &seeded {
            index.add_chunk(&record.id, &record.text);
        }
        info!(chunks = seeded.len(), "seeded lexical index from chunk store");
        let lexical = Arc::new(RwLock::new(index));

        let ranker = HybridRanker::new(
            chunks.clone(),
            lexical.clone(),
            graph.clone(),
            embedder.clone(),
            cross_encoder,
            extractor.clone(),
            config.retrieval.clone(),
        );
        let raptor = RaptorBuilder::new(
            chunks.clone(),
            nodes.clone(),
            embedder.clone(),
            summarizer,
            config.raptor.clone(),
        );

        Ok(Self {
            chunks,
            nodes,
            graph,
            lexical,
            embedder,
            extractor,
            ranker,
            raptor,
        })
    }

    /// Ingest one chunk and persist the graph. For feeds, prefer
    /// [`ArgusEngine::ingest_batch`], which saves the graph once.
    pub fn ingest(&self, text: &str, metadata: ChunkMetadata) -> ArgusResult<String> {
        let mut ids = self.ingest_batch(vec![(text.to_string(), metadata)])?;
        Ok(ids.pop().unwrap_or_default())
    }

    /// Ingest a batch of chunks: validate, derive ids, embed, upsert, index
    /// lexically, feed the graph, then persist the graph once. Returns the
    /// chunk ids in input order.
    pub fn ingest_batch(&self, items: Vec<(String, ChunkMetadata)>) -> ArgusResult<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for (_, metadata) in &items {
            metadata.validate()?;
        }

        let chunks: Vec<Chunk> = items
            .into_iter()
            .map(|(text, metadata)| Chunk::new(text, metadata))
            .collect();
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;

        let records: Vec<VectorRecord> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| VectorRecord {
                id: chunk.id.clone(),
                text: chunk.text.clone(),
                embedding,
                metadata: chunk.metadata.to_value(),
            })
            .collect();
        self.chunks.upsert(&records)?;

        {
            let mut index = self.lexical.write().map_err(|_| poisoned("lexical index"))?;
            for chunk in &chunks {
                index.add_chunk(&chunk.id, &chunk.text);
            }
        }
        {
            let mut graph = self.graph.write().map_err(|_| poisoned("graph"))?;
            for chunk in &chunks {
                let entities = self.extractor.extract(&chunk.text);
                graph.add_chunk(&chunk.id, &entities, &chunk.metadata);
            }
            graph.save()?;
        }

        debug!(chunks = chunks.len(), "ingested batch");
        Ok(chunks.into_iter().map(|c| c.id).collect())
    }

    pub fn hybrid_search(&self, query: &str, k: usize) -> ArgusResult<Vec<Hit>> {
        self.ranker.hybrid_search(query, k)
    }

    pub fn build_raptor_nodes(
        &self,
        topic_hint: &str,
        incremental: bool,
        cancel: &CancelToken,
    ) -> ArgusResult<BuildOutcome> {
        self.raptor.build_nodes(topic_hint, incremental, cancel)
    }

    pub fn query_raptor_nodes(&self, query: &str, k: usize) -> ArgusResult<Vec<NodeHit>> {
        query_nodes(self.nodes.as_ref(), self.embedder.as_ref(), query, k)
    }

    pub fn top_entities(&self, n: usize) -> ArgusResult<Vec<EntityRank>> {
        let graph = self.graph.read().map_err(|_| poisoned("graph"))?;
        Ok(graph.top_entities(n))
    }

    pub fn communities(&self, max_communities: usize) -> ArgusResult<Vec<Community>> {
        let graph = self.graph.read().map_err(|_| poisoned("graph"))?;
        Ok(graph.communities(max_communities))
    }

    /// Whether the cross-encoder has degraded to the embedding fallback.
    pub fn rerank_degraded(&self) -> bool {
        self.ranker.rerank_degraded()
    }

    pub fn reset_rerank(&self) {
        self.ranker.reset_rerank();
    }
}
