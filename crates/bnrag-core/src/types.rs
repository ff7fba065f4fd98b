//! Domain types shared by the normalizer, the retrievers and the answer pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ChunkId = u32;

fn default_kind() -> String {
    "text".to_string()
}

/// A retrievable unit of source text produced by the ingestion pipeline.
///
/// - `id`: unique and stable across runs
/// - `text`: non-empty payload that every retriever scores against
/// - `kind`: categorical tag (`"type"` on disk), informational only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

impl Chunk {
    pub fn new(id: ChunkId, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), kind: default_kind() }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}

/// Indicates which engine produced a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Vector,
    Keyword,
    Hybrid,
}

/// A chunk annotated with an engine-specific score; higher is always better.
///
/// `rank` is the 0-based position in the list that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
    pub rank: Option<usize>,
    pub source: SourceKind,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f32, source: SourceKind) -> Self {
        Self { chunk, score, rank: None, source }
    }

    /// Alias used by the semantic retriever, where the score is a cosine similarity.
    pub fn similarity_score(&self) -> f32 {
        self.score
    }
}

/// Retrieval strategy requested by a caller.
///
/// Deserializes through [`SearchMethod::parse`], so config and stored turns
/// accept the same aliases and unknown names as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SearchMethod {
    Vector,
    Keyword,
    #[default]
    Hybrid,
}

impl SearchMethod {
    pub const ALL: [SearchMethod; 3] = [SearchMethod::Hybrid, SearchMethod::Vector, SearchMethod::Keyword];

    /// Parses a method name. Unknown names fall back to [`SearchMethod::Hybrid`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "vector" | "semantic" => SearchMethod::Vector,
            "keyword" | "lexical" => SearchMethod::Keyword,
            _ => SearchMethod::Hybrid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMethod::Vector => "vector",
            SearchMethod::Keyword => "keyword",
            SearchMethod::Hybrid => "hybrid",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SearchMethod::Vector => "Semantic search that understands meaning",
            SearchMethod::Keyword => "Traditional keyword matching",
            SearchMethod::Hybrid => "Combines vector and keyword search for best results",
        }
    }
}

impl From<String> for SearchMethod {
    fn from(name: String) -> Self {
        SearchMethod::parse(&name)
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One previous question/answer exchange, consumed read-only by prompt assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    pub method: SearchMethod,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, method: SearchMethod) -> Self {
        Self { question: question.into(), answer: answer.into(), timestamp: Utc::now(), method }
    }
}
