//! Incremental BM25 Okapi index.
//!
//! Postings, per-document term frequencies, and corpus statistics are
//! maintained on add/remove, so `query` only touches the query terms'
//! postings lists.

use std::collections::HashMap;

use tracing::debug;

use crate::tokenizer::tokenize;

const K1: f64 = 1.5;
const B: f64 = 0.75;

#[derive(Debug, Clone)]
struct DocEntry {
    /// Insertion order, used as the stable tie-break.
    order: u64,
    /// Token count of the document.
    len: usize,
    /// Term frequencies, kept so removal can decrement postings.
    terms: HashMap<String, u32>,
}

/// Inverted BM25 index over chunk texts.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    docs: HashMap<String, DocEntry>,
    /// term -> (chunk id -> term frequency)
    postings: HashMap<String, HashMap<String, u32>>,
    total_len: usize,
    next_order: u64,
}

impl LexicalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a chunk. Re-adding an existing id replaces its old postings
    /// (upsert), matching the idempotent re-ingestion contract.
    pub fn add_chunk(&mut self, chunk_id: &str, text: &str) {
        if self.docs.contains_key(chunk_id) {
            self.remove_chunk(chunk_id);
        }

        let tokens = tokenize(text);
        let mut terms: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            *terms.entry(token.clone()).or_insert(0) += 1;
        }

        for (term, tf) in &terms {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(chunk_id.to_string(), *tf);
        }

        self.total_len += tokens.len();
        let order = self.next_order;
        self.next_order += 1;
        self.docs.insert(
            chunk_id.to_string(),
            DocEntry {
                order,
                len: tokens.len(),
                terms,
            },
        );
    }

    /// Drop a chunk from the index. Unknown ids are a no-op.
    pub fn remove_chunk(&mut self, chunk_id: &str) {
        let Some(entry) = self.docs.remove(chunk_id) else {
            return;
        };
        self.total_len -= entry.len;
        for term in entry.terms.keys() {
            if let Some(posting) = self.postings.get_mut(term) {
                posting.remove(chunk_id);
                if posting.is_empty() {
                    self.postings.remove(term);
                }
            }
        }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Top-k chunk ids by BM25 score, descending. Ties break by insertion
    /// order (stable). Empty corpus or a query with no indexable tokens
    /// returns an empty list, never an error.
    pub fn query(&self, q: &str, k: usize) -> Vec<(String, f64)> {
        if self.docs.is_empty() || k == 0 {
            return Vec::new();
        }
        let terms = tokenize(q);
        if terms.is_empty() {
            return Vec::new();
        }

        let n_docs = self.docs.len() as f64;
        let avgdl = self.total_len as f64 / n_docs;
        let mut scores: HashMap<&str, f64> = HashMap::new();

        for term in &terms {
            let Some(posting) = self.postings.get(term) else {
                continue;
            };
            let df = posting.len() as f64;
            let idf = (1.0 + (n_docs - df + 0.5) / (df + 0.5)).ln();
            for (chunk_id, &tf) in posting {
                // docs and postings are kept in lockstep.
                let Some(entry) = self.docs.get(chunk_id) else {
                    continue;
                };
                let tf = tf as f64;
                let norm = K1 * (1.0 - B + B * entry.len as f64 / avgdl);
                *scores.entry(chunk_id.as_str()).or_default() += idf * tf * (K1 + 1.0) / (tf + norm);
            }
        }

        let mut ranked: Vec<(&str, f64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    let oa = self.docs[a.0].order;
                    let ob = self.docs[b.0].order;
                    oa.cmp(&ob)
                })
        });
        ranked.truncate(k);

        debug!(query_terms = terms.len(), results = ranked.len(), "lexical query");
        ranked
            .into_iter()
            .map(|(id, score)| (id.to_string(), score))
            .collect()
    }
}
