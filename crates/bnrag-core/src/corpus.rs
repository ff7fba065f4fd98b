//! The ordered, immutable chunk sequence every retriever scores against.
//!
//! Chunks arrive from the ingestion pipeline as `{"chunks": [{"id", "text", "type"}]}`.
//! Position in the sequence is the alignment key for the embedding index.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Chunk, ChunkId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    chunks: Vec<Chunk>,
}

#[derive(Deserialize)]
struct ProcessedData {
    chunks: Vec<Chunk>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate ids and empty texts.
    pub fn new(chunks: Vec<Chunk>) -> Result<Self> {
        let mut seen: HashSet<ChunkId> = HashSet::with_capacity(chunks.len());
        for (pos, chunk) in chunks.iter().enumerate() {
            if !seen.insert(chunk.id) {
                return Err(Error::config(format!("duplicate chunk id {} at position {}", chunk.id, pos)));
            }
            if chunk.text.trim().is_empty() {
                return Err(Error::config(format!("chunk {} has empty text", chunk.id)));
            }
        }
        Ok(Self { chunks })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::config(format!("corpus file not found: {}", path.display())),
            _ => Error::Io { path: path.display().to_string(), source: e },
        })?;
        let data: ProcessedData = serde_json::from_str(&raw)
            .map_err(|source| Error::Json { path: path.display().to_string(), source })?;
        let corpus = Self::new(data.chunks)?;
        tracing::info!(chunks = corpus.len(), path = %path.display(), "corpus loaded");
        Ok(corpus)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, position: usize) -> Option<&Chunk> {
        self.chunks.get(position)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn texts(&self) -> Vec<String> {
        self.chunks.iter().map(|c| c.text.clone()).collect()
    }

    /// Content fingerprint input: ids and texts in corpus order.
    pub fn fingerprint_material(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.id.to_le_bytes());
            out.extend_from_slice(chunk.text.as_bytes());
            out.push(0);
        }
        out
    }
}
