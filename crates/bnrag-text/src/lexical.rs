use std::sync::Arc;

use bnrag_core::{Chunk, Corpus, ScoredChunk, SourceKind};

use crate::transliterate::Normalizer;

/// Bonus added when the whole normalized query appears verbatim in a chunk.
pub const PHRASE_BONUS: u32 = 5;
/// Tokens must be longer than this many characters to count.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Keyword retriever over raw substring counts.
///
/// Tokens are counted as plain substrings, so `"kal"` also scores inside
/// `"kalyani"`. The normalizer matches whole words only; the two are kept
/// different on purpose and lexical scores can over-match.
pub struct LexicalRetriever {
    corpus: Arc<Corpus>,
    normalizer: Arc<Normalizer>,
    lowered: Vec<String>,
}

impl LexicalRetriever {
    pub fn new(corpus: Arc<Corpus>, normalizer: Arc<Normalizer>) -> Self {
        let lowered = corpus.chunks().iter().map(|c| c.text.to_lowercase()).collect();
        Self { corpus, normalizer, lowered }
    }

    /// Raw query tokens followed by normalized tokens, not de-duplicated.
    pub fn query_tokens(&self, query: &str) -> (Vec<String>, String) {
        let normalized = self.normalizer.normalize(query);
        let tokens = query
            .to_lowercase()
            .split_whitespace()
            .chain(normalized.split_whitespace())
            .map(str::to_string)
            .collect();
        (tokens, normalized)
    }

    /// `(corpus position, score)` for every chunk with a non-zero score, best first.
    pub fn score(&self, query: &str) -> Vec<(usize, u32)> {
        let (tokens, normalized) = self.query_tokens(query);
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).filter(|t| t.chars().count() > MIN_TOKEN_CHARS).collect();
        let phrase = normalized.trim();

        let mut scored: Vec<(usize, u32)> = self
            .lowered
            .iter()
            .enumerate()
            .filter_map(|(pos, text)| {
                let mut score: u32 = tokens.iter().map(|t| text.matches(t).count() as u32).sum();
                if !phrase.is_empty() && text.contains(phrase) {
                    score += PHRASE_BONUS;
                }
                (score > 0).then_some((pos, score))
            })
            .collect();
        // stable: equal scores keep corpus order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        tracing::debug!(query = %query, tokens = tokens.len(), matches = scored.len(), "lexical scoring done");
        scored
    }

    pub fn retrieve_scored(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        if top_k == 0 {
            return Vec::new();
        }
        self.score(query)
            .into_iter()
            .take(top_k)
            .enumerate()
            .filter_map(|(rank, (pos, score))| {
                self.corpus.get(pos).map(|chunk| ScoredChunk {
                    chunk: chunk.clone(),
                    score: score as f32,
                    rank: Some(rank),
                    source: SourceKind::Keyword,
                })
            })
            .collect()
    }

    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<Chunk> {
        self.retrieve_scored(query, top_k).into_iter().map(|s| s.chunk).collect()
    }
}
