//! JSON embedding cache tied to one corpus and one embedder.
//!
//! The file records the `embedder_id` and a blake3 fingerprint of the corpus
//! (ids + texts) it was built from; loading a cache that belongs to another
//! corpus or model is a configuration error rather than a silent mismatch.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use bnrag_core::{Corpus, Error, Result};

use crate::index::EmbeddingIndex;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingCache {
    pub embedder_id: String,
    pub dim: usize,
    pub corpus_fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub vectors: Vec<Vec<f32>>,
}

pub fn corpus_fingerprint(corpus: &Corpus) -> String {
    blake3::hash(&corpus.fingerprint_material()).to_hex().to_string()
}

impl EmbeddingCache {
    pub fn new(embedder_id: &str, corpus: &Corpus, index: EmbeddingIndex) -> Self {
        Self {
            embedder_id: embedder_id.to_string(),
            dim: index.dim(),
            corpus_fingerprint: corpus_fingerprint(corpus),
            created_at: Utc::now(),
            vectors: index.into_vectors(),
        }
    }

    /// `Ok(None)` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::Io { path: path.display().to_string(), source }),
        };
        let cache: Self =
            serde_json::from_str(&raw).map_err(|source| Error::Json { path: path.display().to_string(), source })?;
        tracing::info!(vectors = cache.vectors.len(), embedder = %cache.embedder_id, path = %path.display(), "embedding cache loaded");
        Ok(Some(cache))
    }

    /// Write through a temporary sibling file, then rename into place.
    pub fn store(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| Error::Io { path: path.display().to_string(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec(self).map_err(|source| Error::Json { path: path.display().to_string(), source })?;
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        tracing::info!(vectors = self.vectors.len(), path = %path.display(), "embedding cache written");
        Ok(())
    }

    pub fn validate(&self, corpus: &Corpus, embedder_id: &str) -> Result<()> {
        if self.embedder_id != embedder_id {
            return Err(Error::config(format!(
                "embedding cache was built by {} but the active embedder is {}",
                self.embedder_id, embedder_id
            )));
        }
        if self.vectors.len() != corpus.len() {
            return Err(Error::config(format!(
                "embedding cache has {} vectors but corpus has {} chunks",
                self.vectors.len(),
                corpus.len()
            )));
        }
        if self.corpus_fingerprint != corpus_fingerprint(corpus) {
            return Err(Error::config("embedding cache was built from a different corpus; rebuild it"));
        }
        if self.vectors.iter().any(|v| v.len() != self.dim) {
            return Err(Error::config(format!("embedding cache has vectors that are not {}-dimensional", self.dim)));
        }
        Ok(())
    }

    pub fn into_index(self) -> Result<EmbeddingIndex> {
        EmbeddingIndex::new(self.vectors)
    }
}
