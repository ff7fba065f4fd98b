//! Weighted-score + rank-bonus fusion of the semantic and keyword lists.
//!
//! Raw cosine similarities and keyword counts are not comparable, so besides
//! the weighted scores each list contributes a positional bonus: a chunk near
//! the top of either list is favoured even when its raw score is modest.
//!
//! ```text
//! final = 0.6 * vector_score + 0.3 * keyword_score
//!       + 0.05 * rank_bonus_vector + 0.05 * rank_bonus_keyword
//! ```
use std::cmp::Ordering;
use std::collections::HashMap;

use bnrag_core::{Chunk, ChunkId, ScoredChunk};

pub const VECTOR_WEIGHT: f64 = 0.6;
pub const KEYWORD_WEIGHT: f64 = 0.3;
pub const RANK_BONUS_WEIGHT: f64 = 0.05;

/// Per-chunk accumulator. A chunk found by both retrievers carries both halves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FusionRecord {
    pub vector_score: f64,
    pub keyword_score: f64,
    pub rank_bonus_vector: f64,
    pub rank_bonus_keyword: f64,
}

impl FusionRecord {
    /// Contribution of the semantic hit at `rank` in a list of `len`.
    pub fn vector(similarity: f32, rank: usize, len: usize) -> Self {
        Self {
            vector_score: f64::from(similarity) * 100.0,
            rank_bonus_vector: (len - rank) as f64 * 2.0,
            ..Self::default()
        }
    }

    /// Contribution of the keyword hit at `rank` in a list of `len`.
    pub fn keyword(rank: usize, len: usize) -> Self {
        Self {
            keyword_score: 10usize.saturating_sub(rank).max(1) as f64,
            rank_bonus_keyword: (len - rank) as f64,
            ..Self::default()
        }
    }

    pub fn accumulate(&mut self, other: &FusionRecord) {
        self.vector_score += other.vector_score;
        self.keyword_score += other.keyword_score;
        self.rank_bonus_vector += other.rank_bonus_vector;
        self.rank_bonus_keyword += other.rank_bonus_keyword;
    }

    pub fn total(&self) -> f64 {
        VECTOR_WEIGHT * self.vector_score
            + KEYWORD_WEIGHT * self.keyword_score
            + RANK_BONUS_WEIGHT * self.rank_bonus_vector
            + RANK_BONUS_WEIGHT * self.rank_bonus_keyword
    }
}

#[derive(Debug, Clone)]
pub struct FusedChunk {
    pub chunk: Chunk,
    pub record: FusionRecord,
    pub score: f64,
}

/// Fuse the two ranked lists, best first.
///
/// Records are kept in discovery order (semantic list, then keyword-only
/// additions) and sorted stably, so equal scores keep that order.
pub fn fuse(vector_hits: &[ScoredChunk], keyword_hits: &[Chunk]) -> Vec<FusedChunk> {
    let mut order: Vec<(Chunk, FusionRecord)> = Vec::with_capacity(vector_hits.len() + keyword_hits.len());
    let mut by_id: HashMap<ChunkId, usize> = HashMap::new();

    let mut add = |chunk: &Chunk, contribution: FusionRecord| match by_id.get(&chunk.id) {
        Some(&pos) => order[pos].1.accumulate(&contribution),
        None => {
            by_id.insert(chunk.id, order.len());
            order.push((chunk.clone(), contribution));
        }
    };

    let vector_len = vector_hits.len();
    for (rank, hit) in vector_hits.iter().enumerate() {
        add(&hit.chunk, FusionRecord::vector(hit.score, rank, vector_len));
    }
    let keyword_len = keyword_hits.len();
    for (rank, chunk) in keyword_hits.iter().enumerate() {
        add(chunk, FusionRecord::keyword(rank, keyword_len));
    }

    let mut fused: Vec<FusedChunk> = order
        .into_iter()
        .map(|(chunk, record)| FusedChunk { score: record.total(), chunk, record })
        .collect();
    fused.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    fused
}
