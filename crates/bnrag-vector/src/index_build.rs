use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use bnrag_core::traits::Embedder;
use bnrag_core::{Corpus, Error, Result};

use crate::cache::EmbeddingCache;
use crate::index::EmbeddingIndex;

/// Embed every chunk in corpus order, `batch_size` texts per embedder call.
pub fn embed_corpus(embedder: &dyn Embedder, corpus: &Corpus, batch_size: usize) -> Result<EmbeddingIndex> {
    if corpus.is_empty() {
        return Ok(EmbeddingIndex::empty());
    }
    let batch_size = batch_size.max(1);
    let texts = corpus.texts();
    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(embedder.embedder_id().to_string());

    let mut vectors = Vec::with_capacity(texts.len());
    for batch in texts.chunks(batch_size) {
        let embedded = embedder.embed_batch(batch).map_err(|e| Error::Embedding(format!("{e:#}")))?;
        if embedded.len() != batch.len() {
            return Err(Error::Embedding(format!("embedder returned {} vectors for {} texts", embedded.len(), batch.len())));
        }
        vectors.extend(embedded);
        pb.set_position(vectors.len() as u64);
    }
    pb.finish_with_message("embeddings ready");
    EmbeddingIndex::new(vectors)
}

/// Load a valid cache from `path`, or embed the corpus and write the cache once.
///
/// An existing cache that belongs to another corpus or embedder is an error
/// unless `force` is set, in which case it is rebuilt.
pub fn load_or_build(path: &Path, corpus: &Corpus, embedder: &dyn Embedder, batch_size: usize, force: bool) -> Result<EmbeddingIndex> {
    if !force {
        if let Some(cache) = EmbeddingCache::load(path)? {
            cache.validate(corpus, embedder.embedder_id())?;
            let index = cache.into_index()?;
            index.ensure_aligned(corpus)?;
            return Ok(index);
        }
        tracing::info!(path = %path.display(), chunks = corpus.len(), "no embedding cache yet, building");
    } else {
        tracing::info!(path = %path.display(), chunks = corpus.len(), "rebuilding embedding cache");
    }

    let index = embed_corpus(embedder, corpus, batch_size)?;
    let cache = EmbeddingCache::new(embedder.embedder_id(), corpus, index);
    cache.store(path)?;
    cache.into_index()
}

/// Query-path loader: the cache must already exist and match.
pub fn load_existing(path: &Path, corpus: &Corpus, embedder_id: &str) -> Result<EmbeddingIndex> {
    let cache = EmbeddingCache::load(path)?
        .ok_or_else(|| Error::config(format!("embedding cache not found: {} (run bnrag-indexer first)", path.display())))?;
    cache.validate(corpus, embedder_id)?;
    cache.into_index()
}
