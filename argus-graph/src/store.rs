//! Graph mechanics: node/edge bookkeeping on petgraph, persistence, and
//! the three read APIs. Scoring policy lives in [`crate::policy`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use argus_core::config::GraphConfig;
use argus_core::errors::{ArgusResult, GraphError};
use argus_core::ChunkMetadata;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::communities::{louvain, Community};
use crate::extract::co_mention_pairs;
use crate::policy;

/// Graph node payload. Document nodes exist only for provenance and boost
/// computation; they are never merged with entity nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphNode {
    Entity {
        name: String,
        mention_count: u64,
    },
    Doc {
        doc_id: String,
        url: Option<String>,
        host: Option<String>,
    },
}

/// One entry from `top_entities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRank {
    pub name: String,
    pub score: f64,
    pub degree: usize,
    pub mention_count: u64,
}

/// On-disk shape: nodes in index order plus weighted edges.
#[derive(Serialize, Deserialize)]
struct PersistedGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<(u32, u32, u32)>,
}

/// The co-mention knowledge graph. Single logical writer; wrap in a
/// reader-writer lock for concurrent readers.
pub struct GraphStore {
    graph: UnGraph<GraphNode, u32>,
    entity_index: HashMap<String, NodeIndex>,
    doc_index: HashMap<String, NodeIndex>,
    path: PathBuf,
    max_pairs_per_chunk: usize,
}

impl GraphStore {
    /// Load the graph from its persistence file. A missing file starts
    /// empty; a corrupt file is a recoverable data-loss event — the store
    /// starts empty and the condition is logged distinctly, never fatal.
    pub fn load(config: &GraphConfig) -> Self {
        let mut store = Self {
            graph: UnGraph::default(),
            entity_index: HashMap::new(),
            doc_index: HashMap::new(),
            path: config.path.clone(),
            max_pairs_per_chunk: config.max_pairs_per_chunk,
        };

        if !config.path.exists() {
            debug!(path = %config.path.display(), "no persisted graph, starting empty");
            return store;
        }

        match std::fs::read_to_string(&config.path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<PersistedGraph>(&raw).map_err(|e| e.to_string()))
        {
            Ok(persisted) => {
                store.restore(persisted);
                info!(
                    entities = store.entity_index.len(),
                    docs = store.doc_index.len(),
                    "knowledge graph loaded"
                );
            }
            Err(reason) => {
                warn!(
                    path = %config.path.display(),
                    %reason,
                    "persisted graph unreadable, reinitializing empty graph (data loss)"
                );
            }
        }
        store
    }

    fn restore(&mut self, persisted: PersistedGraph) {
        for node in persisted.nodes {
            let key_entity = match &node {
                GraphNode::Entity { name, .. } => Some(name.clone()),
                GraphNode::Doc { .. } => None,
            };
            let key_doc = match &node {
                GraphNode::Doc { doc_id, .. } => Some(doc_id.clone()),
                GraphNode::Entity { .. } => None,
            };
            let idx = self.graph.add_node(node);
            if let Some(name) = key_entity {
                self.entity_index.insert(name, idx);
            }
            if let Some(doc_id) = key_doc {
                self.doc_index.insert(doc_id, idx);
            }
        }
        for (a, b, w) in persisted.edges {
            let (a, b) = (NodeIndex::new(a as usize), NodeIndex::new(b as usize));
            if a.index() < self.graph.node_count() && b.index() < self.graph.node_count() {
                self.graph.add_edge(a, b, w);
            }
        }
    }

    /// Serialize the whole graph to its single persistence file.
    pub fn save(&self) -> ArgusResult<()> {
        let persisted = PersistedGraph {
            nodes: self.graph.node_indices().map(|i| self.graph[i].clone()).collect(),
            edges: self
                .graph
                .edge_indices()
                .filter_map(|e| {
                    let (a, b) = self.graph.edge_endpoints(e)?;
                    Some((a.index() as u32, b.index() as u32, self.graph[e]))
                })
                .collect(),
        };
        let raw = serde_json::to_string(&persisted).map_err(|e| GraphError::Serialization {
            reason: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GraphError::PersistFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        std::fs::write(&self.path, raw).map_err(|e| GraphError::PersistFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Record one ingested chunk: bump mention counts, increment co-mention
    /// edges, and link a provenance document node (weight pinned at 1).
    pub fn add_chunk(&mut self, chunk_id: &str, entities: &[String], meta: &ChunkMetadata) {
        for entity in entities {
            let idx = self.ensure_entity(entity);
            if let GraphNode::Entity { mention_count, .. } = &mut self.graph[idx] {
                *mention_count += 1;
            }
        }

        for (a, b) in co_mention_pairs(entities, self.max_pairs_per_chunk) {
            let ia = self.ensure_entity(&a);
            let ib = self.ensure_entity(&b);
            match self.graph.find_edge(ia, ib) {
                Some(edge) => self.graph[edge] += 1,
                None => {
                    self.graph.add_edge(ia, ib, 1);
                }
            }
        }

        let doc_key = if !meta.doc_id.is_empty() {
            Some(meta.doc_id.clone())
        } else {
            meta.url.clone()
        };
        if let Some(doc_key) = doc_key {
            let doc_idx = self.ensure_doc(&doc_key, meta);
            for entity in entities {
                let ent_idx = self.ensure_entity(entity);
                if self.graph.find_edge(doc_idx, ent_idx).is_none() {
                    self.graph.add_edge(doc_idx, ent_idx, 1);
                }
            }
        }

        debug!(chunk_id, entities = entities.len(), "chunk added to graph");
    }

    fn ensure_entity(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.entity_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::Entity {
            name: name.to_string(),
            mention_count: 0,
        });
        self.entity_index.insert(name.to_string(), idx);
        idx
    }

    fn ensure_doc(&mut self, doc_key: &str, meta: &ChunkMetadata) -> NodeIndex {
        if let Some(&idx) = self.doc_index.get(doc_key) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::Doc {
            doc_id: doc_key.to_string(),
            url: meta.url.clone(),
            host: meta.host.clone(),
        });
        self.doc_index.insert(doc_key.to_string(), idx);
        idx
    }

    pub fn entity_count(&self) -> usize {
        self.entity_index.len()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_index.len()
    }

    /// Mention count for an entity, if present.
    pub fn mention_count(&self, name: &str) -> Option<u64> {
        self.entity_index.get(name).and_then(|&idx| match &self.graph[idx] {
            GraphNode::Entity { mention_count, .. } => Some(*mention_count),
            GraphNode::Doc { .. } => None,
        })
    }

    /// Co-mention edge weight between two entities, if the edge exists.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<u32> {
        let ia = *self.entity_index.get(a)?;
        let ib = *self.entity_index.get(b)?;
        self.graph.find_edge(ia, ib).map(|e| self.graph[e])
    }

    /// Top `n` entities by the quality-filtered composite score,
    /// descending. Ties keep insertion order (stable sort).
    pub fn top_entities(&self, n: usize) -> Vec<EntityRank> {
        let mut ranked: Vec<EntityRank> = self
            .graph
            .node_indices()
            .filter_map(|idx| match &self.graph[idx] {
                GraphNode::Entity { name, mention_count } if policy::is_quality_entity(name) => {
                    let degree = self.graph.neighbors(idx).count();
                    Some(EntityRank {
                        name: name.clone(),
                        score: policy::entity_score(name, degree, *mention_count),
                        degree,
                        mention_count: *mention_count,
                    })
                }
                _ => None,
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }

    /// Louvain communities over the entity-only subgraph, ranked by their
    /// internal degree sum, with up to 6 representatives each.
    pub fn communities(&self, max_comms: usize) -> Vec<Community> {
        // Entity nodes in index order; positions are the louvain node ids.
        let entity_nodes: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| matches!(self.graph[idx], GraphNode::Entity { .. }))
            .collect();
        if entity_nodes.is_empty() {
            return Vec::new();
        }
        let position: HashMap<NodeIndex, usize> =
            entity_nodes.iter().enumerate().map(|(pos, &idx)| (idx, pos)).collect();

        let mut edges = Vec::new();
        for edge in self.graph.edge_indices() {
            let Some((a, b)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            if let (Some(&pa), Some(&pb)) = (position.get(&a), position.get(&b)) {
                edges.push((pa, pb, f64::from(self.graph[edge])));
            }
        }

        let labels = louvain(entity_nodes.len(), &edges);

        // In-community degree per node (edge count, matching the ranking
        // the read API promises).
        let mut members: HashMap<usize, Vec<usize>> = HashMap::new();
        for (pos, &label) in labels.iter().enumerate() {
            members.entry(label).or_default().push(pos);
        }
        let mut internal_degree = vec![0usize; entity_nodes.len()];
        for &(a, b, _) in &edges {
            if labels[a] == labels[b] {
                internal_degree[a] += 1;
                internal_degree[b] += 1;
            }
        }

        let mut communities: Vec<Community> = members
            .into_iter()
            .map(|(id, mut positions)| {
                positions.sort_by(|&a, &b| internal_degree[b].cmp(&internal_degree[a]));
                let degree_sum = positions.iter().map(|&p| internal_degree[p]).sum();
                let representatives = positions
                    .iter()
                    .take(argus_core::constants::COMMUNITY_REPRESENTATIVES)
                    .map(|&p| match &self.graph[entity_nodes[p]] {
                        GraphNode::Entity { name, .. } => name.clone(),
                        GraphNode::Doc { doc_id, .. } => doc_id.clone(),
                    })
                    .collect();
                Community {
                    id,
                    size: positions.len(),
                    degree_sum,
                    representatives,
                }
            })
            .collect();
        communities.sort_by(|a, b| b.degree_sum.cmp(&a.degree_sum).then(a.id.cmp(&b.id)));
        communities.truncate(max_comms);
        communities
    }

    /// Boost map `{doc_id -> 1 + ln(1 + hits)}` where `hits` counts the
    /// document's linked entities that intersect `query_entities`. At most
    /// `k` documents, highest boost first. Empty query entities yield an
    /// empty map — no boost is not an error.
    pub fn doc_boosts(&self, query_entities: &[String], k: usize) -> HashMap<String, f64> {
        if query_entities.is_empty() || k == 0 {
            return HashMap::new();
        }
        let query_set: HashSet<&str> = query_entities.iter().map(String::as_str).collect();

        let mut boosts: Vec<(String, f64)> = self
            .doc_index
            .iter()
            .filter_map(|(doc_id, &doc_idx)| {
                let hits = self
                    .graph
                    .neighbors(doc_idx)
                    .filter(|&nb| match &self.graph[nb] {
                        GraphNode::Entity { name, .. } => query_set.contains(name.as_str()),
                        GraphNode::Doc { .. } => false,
                    })
                    .count();
                if hits > 0 {
                    Some((doc_id.clone(), 1.0 + (1.0 + hits as f64).ln()))
                } else {
                    None
                }
            })
            .collect();

        boosts.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        boosts.truncate(k);
        boosts.into_iter().collect()
    }

    /// Path of the persistence file this store was configured with.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
