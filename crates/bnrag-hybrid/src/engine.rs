use std::path::Path;
use std::sync::Arc;

use bnrag_core::config::Settings;
use bnrag_core::traits::Embedder;
use bnrag_core::{Chunk, Corpus, Error, Result, ScoredChunk, SearchMethod, SourceKind};
use bnrag_text::{LexicalRetriever, Normalizer, TransliterationTable};
use bnrag_vector::{EmbeddingIndex, SemanticRetriever};

use crate::fusion::{fuse, FusedChunk};

/// Ordered chunks from one retrieval call.
#[derive(Debug, Clone)]
pub struct Retrieval {
    /// The method that was requested.
    pub method: SearchMethod,
    pub hits: Vec<ScoredChunk>,
    /// Hybrid fell back to lexical-only results because embedding failed.
    pub degraded: bool,
}

impl Retrieval {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.hits.iter().map(|h| &h.chunk)
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.hits.into_iter().map(|h| h.chunk).collect()
    }
}

/// Summary numbers for `stats` style reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineStats {
    pub total_chunks: usize,
    pub embedding_dimensions: usize,
    pub embedder_id: String,
    pub transliteration_entries: usize,
}

/// Read-only retrieval engine over one corpus and its embedding index.
///
/// Everything it holds is shared through `Arc`, so an engine can serve
/// concurrent queries without locking.
pub struct RetrievalEngine {
    corpus: Arc<Corpus>,
    normalizer: Arc<Normalizer>,
    embedder: Arc<dyn Embedder>,
    index: Arc<EmbeddingIndex>,
    lexical: LexicalRetriever,
    semantic: SemanticRetriever,
}

impl RetrievalEngine {
    pub fn new(corpus: Corpus, index: EmbeddingIndex, table: TransliterationTable, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let corpus = Arc::new(corpus);
        let index = Arc::new(index);
        let normalizer = Arc::new(Normalizer::new(Arc::new(table)));
        let semantic = SemanticRetriever::new(corpus.clone(), index.clone(), embedder.clone(), normalizer.clone())?;
        let lexical = LexicalRetriever::new(corpus.clone(), normalizer.clone());
        tracing::info!(
            chunks = corpus.len(),
            dim = index.dim(),
            embedder = %embedder.embedder_id(),
            table = normalizer.table().len(),
            "retrieval engine ready"
        );
        Ok(Self { corpus, normalizer, embedder, index, lexical, semantic })
    }

    /// Load corpus, transliteration table and embedding cache as configured.
    ///
    /// The cache must already exist; building it is the indexer's job.
    pub fn from_settings(settings: &Settings, base: &Path) -> Result<Self> {
        let corpus = Corpus::load(&settings.data.chunks_path(base))?;
        let table_path = settings.data.transliteration_path(base);
        let table = TransliterationTable::load(table_path.as_deref())?;
        let embedder: Arc<dyn Embedder> = Arc::from(
            bnrag_embed::get_default_embedder(&settings.embedding).map_err(|e| Error::config(format!("loading embedder: {e:#}")))?,
        );
        let index = bnrag_vector::load_existing(&settings.data.embeddings_path(base), &corpus, embedder.embedder_id())?;
        Self::new(corpus, index, table, embedder)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_chunks: self.corpus.len(),
            embedding_dimensions: self.index.dim(),
            embedder_id: self.embedder.embedder_id().to_string(),
            transliteration_entries: self.normalizer.table().len(),
        }
    }

    /// Dispatch on `method`. An empty result is "nothing found", not an error.
    pub fn retrieve(&self, query: &str, method: SearchMethod, top_k: usize) -> Result<Retrieval> {
        if self.normalizer.is_romanized(query) {
            tracing::debug!(query = %query, normalized = %self.normalizer.normalize(query), "romanized query");
        }
        let (hits, degraded) = match method {
            SearchMethod::Vector => (self.semantic.retrieve(query, top_k)?, false),
            SearchMethod::Keyword => (self.lexical.retrieve_scored(query, top_k), false),
            SearchMethod::Hybrid => self.retrieve_hybrid(query, top_k)?,
        };
        tracing::debug!(method = %method, hits = hits.len(), degraded, "retrieval done");
        Ok(Retrieval { method, hits, degraded })
    }

    pub fn retrieve_vector(&self, query: &str, top_k: usize) -> Result<Vec<Chunk>> {
        Ok(self.semantic.retrieve(query, top_k)?.into_iter().map(|h| h.chunk).collect())
    }

    pub fn retrieve_keyword(&self, query: &str, top_k: usize) -> Vec<Chunk> {
        self.lexical.retrieve(query, top_k)
    }

    /// Fused ranking with the per-chunk score breakdown, strictly (embedding
    /// errors propagate).
    pub fn fuse_ranked(&self, query: &str, top_k: usize) -> Result<Vec<FusedChunk>> {
        let wide = top_k.saturating_mul(2);
        let vector_hits = self.semantic.retrieve(query, wide)?;
        let keyword_hits = self.lexical.retrieve(query, wide);
        let mut fused = fuse(&vector_hits, &keyword_hits);
        fused.truncate(top_k);
        Ok(fused)
    }

    fn retrieve_hybrid(&self, query: &str, top_k: usize) -> Result<(Vec<ScoredChunk>, bool)> {
        match self.fuse_ranked(query, top_k) {
            Ok(fused) => {
                let hits = fused
                    .into_iter()
                    .enumerate()
                    .map(|(rank, f)| ScoredChunk { chunk: f.chunk, score: f.score as f32, rank: Some(rank), source: SourceKind::Hybrid })
                    .collect();
                Ok((hits, false))
            }
            Err(Error::Embedding(reason)) => {
                tracing::warn!(query = %query, %reason, "embedding failed, falling back to keyword retrieval");
                Ok((self.lexical.retrieve_scored(query, top_k), true))
            }
            Err(e) => Err(e),
        }
    }
}
