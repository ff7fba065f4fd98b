use std::cmp::Ordering;
use std::sync::Arc;

use bnrag_core::traits::Embedder;
use bnrag_core::{Corpus, Error, Result, ScoredChunk, SourceKind};
use bnrag_text::Normalizer;

use crate::index::EmbeddingIndex;

/// Hits must score strictly above this cosine similarity.
pub const SIMILARITY_THRESHOLD: f32 = 0.1;

pub struct SemanticRetriever {
    corpus: Arc<Corpus>,
    index: Arc<EmbeddingIndex>,
    embedder: Arc<dyn Embedder>,
    normalizer: Arc<Normalizer>,
}

impl SemanticRetriever {
    pub fn new(corpus: Arc<Corpus>, index: Arc<EmbeddingIndex>, embedder: Arc<dyn Embedder>, normalizer: Arc<Normalizer>) -> Result<Self> {
        index.ensure_aligned(&corpus)?;
        if !index.is_empty() && index.dim() != embedder.dim() {
            return Err(Error::config(format!(
                "embedding index dimension {} does not match embedder {} ({})",
                index.dim(),
                embedder.embedder_id(),
                embedder.dim()
            )));
        }
        Ok(Self { corpus, index, embedder, normalizer })
    }

    /// Text actually sent to the embedder: the original query followed by its normalized form.
    pub fn combined_query(&self, query: &str) -> String {
        format!("{} {}", query, self.normalizer.normalize(query))
    }

    /// Top `top_k` chunks by cosine similarity, then anything at or below
    /// [`SIMILARITY_THRESHOLD`] is dropped. Equal similarities keep index order.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        if top_k == 0 || self.index.is_empty() {
            return Ok(Vec::new());
        }
        let combined = self.combined_query(query);
        let query_vec = self.embedder.embed_one(&combined).map_err(|e| Error::Embedding(format!("{e:#}")))?;
        if query_vec.len() != self.index.dim() {
            return Err(Error::Embedding(format!(
                "query vector has {} dims, index has {}",
                query_vec.len(),
                self.index.dim()
            )));
        }

        let sims = self.index.similarities(&query_vec);
        let mut order: Vec<usize> = (0..sims.len()).collect();
        order.sort_by(|&a, &b| sims[b].partial_cmp(&sims[a]).unwrap_or(Ordering::Equal));

        let hits: Vec<ScoredChunk> = order
            .into_iter()
            .take(top_k)
            .filter(|&pos| sims[pos] > SIMILARITY_THRESHOLD)
            .enumerate()
            .filter_map(|(rank, pos)| {
                self.corpus.get(pos).map(|chunk| ScoredChunk {
                    chunk: chunk.clone(),
                    score: sims[pos],
                    rank: Some(rank),
                    source: SourceKind::Vector,
                })
            })
            .collect();
        tracing::debug!(query = %query, hits = hits.len(), best = hits.first().map(|h| h.score), "semantic retrieval done");
        Ok(hits)
    }
}
