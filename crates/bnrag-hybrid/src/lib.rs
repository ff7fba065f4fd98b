//! bnrag-hybrid
//!
//! Retrieval orchestration (vector, keyword and fused hybrid ranking) and the
//! answer pipeline that turns retrieved chunks into a generated reply.

pub mod answer;
pub mod engine;
pub mod fusion;
pub mod openai;

pub use answer::{AnswerPipeline, Generation, QueryResponse, NOT_FOUND_MESSAGE};
pub use engine::{EngineStats, Retrieval, RetrievalEngine};
pub use fusion::{fuse, FusedChunk, FusionRecord};
pub use openai::OpenAiGenerator;
