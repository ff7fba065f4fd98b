//! In-memory embedding index aligned position-for-position with the corpus.
use bnrag_core::{Corpus, Error, Result};

#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: Vec<Vec<f32>>,
    dim: usize,
}

impl EmbeddingIndex {
    /// All vectors must share one dimension.
    pub fn new(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        if let Some((pos, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(Error::config(format!("embedding {} has dimension {}, expected {}", pos, v.len(), dim)));
        }
        if !vectors.is_empty() && dim == 0 {
            return Err(Error::config("embeddings have dimension 0"));
        }
        Ok(Self { vectors, dim })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ensure_aligned(&self, corpus: &Corpus) -> Result<()> {
        if self.vectors.len() != corpus.len() {
            return Err(Error::config(format!(
                "embedding index has {} vectors but corpus has {} chunks",
                self.vectors.len(),
                corpus.len()
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        self.vectors
    }

    /// Cosine similarity of `query` against every vector, in index order.
    pub fn similarities(&self, query: &[f32]) -> Vec<f32> {
        self.vectors.iter().map(|v| cosine_similarity(query, v)).collect()
    }
}

/// Cosine similarity in [-1, 1]; 0 when either side has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut mag_a, mut mag_b) = (0f64, 0f64, 0f64);
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        mag_a += f64::from(x) * f64::from(x);
        mag_b += f64::from(y) * f64::from(y);
    }
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    (dot / (mag_a.sqrt() * mag_b.sqrt())).clamp(-1.0, 1.0) as f32
}
