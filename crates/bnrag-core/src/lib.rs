//! bnrag-core
//!
//! Shared vocabulary for the retrieval engine: chunk and result types, the
//! corpus loader, collaborator traits, typed errors and Figment-backed
//! configuration.

pub mod config;
pub mod corpus;
pub mod error;
pub mod traits;
pub mod types;

pub use corpus::Corpus;
pub use error::{Error, Result};
pub use types::{Chunk, ChunkId, ConversationTurn, ScoredChunk, SearchMethod, SourceKind};
