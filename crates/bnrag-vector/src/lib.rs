//! bnrag-vector
//!
//! Semantic side of retrieval: the in-memory embedding index, cosine scoring,
//! the semantic retriever, and the on-disk embedding cache it is loaded from.

pub mod cache;
pub mod index;
pub mod index_build;
pub mod search;

pub use cache::{corpus_fingerprint, EmbeddingCache};
pub use index::{cosine_similarity, EmbeddingIndex};
pub use index_build::{embed_corpus, load_existing, load_or_build};
pub use search::{SemanticRetriever, SIMILARITY_THRESHOLD};
