//! Question answering on top of retrieval: prompt assembly with short-term
//! conversation memory, and an explicit outcome for the generation step.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use bnrag_core::traits::Generator;
use bnrag_core::{Chunk, ConversationTurn, Result, SearchMethod};
use bnrag_text::Normalizer;

use crate::engine::RetrievalEngine;

/// Chunks that go into the prompt and into the response.
pub const CONTEXT_CHUNKS: usize = 3;
/// Most recent turns replayed into the prompt.
pub const HISTORY_TURNS: usize = 3;
/// Previous answers are cut to this many characters.
pub const HISTORY_ANSWER_CHARS: usize = 100;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for Bangla literature education with support for Banglish (romanized Bengali) and conversation memory.";

pub const NOT_FOUND_MESSAGE: &str = "দুঃখিত, এই প্রশ্নের উত্তর খুঁজে পাওয়া যায়নি। অন্য প্রশ্ন করার চেষ্টা করুন।\n\nSorry, answer not found for this question. Try asking differently.";

const ERROR_PREFIX: &str = "দুঃখিত, একটি ত্রুটি ঘটেছে";

const ASSISTANT_INTRO: &str = "You are a helpful assistant for Bangla literature educational content.";

/// What the generation step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Generation {
    Answered { text: String },
    /// Retrieval found nothing; the generator was not called.
    NotFound,
    Failed { reason: String },
}

impl Generation {
    /// Text to show the user for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            Generation::Answered { text } => text.clone(),
            Generation::NotFound => NOT_FOUND_MESSAGE.to_string(),
            Generation::Failed { reason } => format!("{ERROR_PREFIX}: {reason}"),
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Generation::Answered { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub question: String,
    pub method: SearchMethod,
    pub answer: Generation,
    /// At most [`CONTEXT_CHUNKS`] of the retrieved chunks, best first.
    pub relevant_chunks: Vec<Chunk>,
    pub total_chunks_found: usize,
    pub used_conversation_memory: bool,
    pub degraded: bool,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

impl QueryResponse {
    /// The exchange to append to the conversation history.
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            question: self.question.clone(),
            answer: self.answer.display_text(),
            timestamp: self.timestamp,
            method: self.method,
        }
    }
}

/// Blank-line separated texts of the first [`CONTEXT_CHUNKS`] chunks.
pub fn build_context(chunks: &[Chunk]) -> String {
    chunks.iter().take(CONTEXT_CHUNKS).map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n")
}

/// Replay of the last [`HISTORY_TURNS`] exchanges, empty without history.
pub fn build_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let recent = &history[history.len().saturating_sub(HISTORY_TURNS)..];
    let mut out = String::from("\n\nRecent conversation context:\n");
    for (i, turn) in recent.iter().enumerate() {
        let n = i + 1;
        let answer: String = turn.answer.chars().take(HISTORY_ANSWER_CHARS).collect();
        out.push_str(&format!("Previous Q{n}: {}\n", turn.question));
        out.push_str(&format!("Previous A{n}: {answer}...\n"));
    }
    out
}

pub fn build_prompt(normalizer: &Normalizer, question: &str, context: &str, history: &str) -> String {
    if normalizer.is_romanized(question) {
        let normalized = normalizer.normalize(question);
        format!(
            "{ASSISTANT_INTRO}

The user asked in Banglish (romanized Bengali): {question}
Which translates to: {normalized}

LONG-TERM MEMORY (Knowledge Base):
{context}

SHORT-TERM MEMORY (Recent Conversation):
{history}

Instructions:
- The user asked in Banglish, so respond in a mix of Bangla and simple English that's easy to understand
- You can use both Bangla script and romanized Bengali (banglish) in your answer
- Consider the conversation history to provide contextual answers
- If this question relates to previous questions, mention the connection
- Be accurate and refer to the provided context
- If you cannot find the answer in the context, say so politely
- Keep answers concise but informative

Answer:"
        )
    } else {
        format!(
            "{ASSISTANT_INTRO}

LONG-TERM MEMORY (Knowledge Base):
{context}

SHORT-TERM MEMORY (Recent Conversation):
{history}

Question: {question}

Instructions:
- Answer in the same language as the question (if Bangla question, answer in Bangla; if English question, answer in English)
- Consider the conversation history to provide contextual and connected answers
- If this question relates to previous questions, mention the connection
- Be accurate and refer to the provided context
- If you cannot find the answer in the context, say so politely
- For multiple choice questions, explain the reasoning
- Keep answers concise but informative

Answer:"
        )
    }
}

pub struct AnswerPipeline<G: Generator> {
    engine: Arc<RetrievalEngine>,
    generator: G,
    top_k: usize,
}

impl<G: Generator> AnswerPipeline<G> {
    pub fn new(engine: Arc<RetrievalEngine>, generator: G, top_k: usize) -> Self {
        Self { engine, generator, top_k }
    }

    pub fn engine(&self) -> &RetrievalEngine {
        &self.engine
    }

    /// Retrieve, then generate. Only retrieval errors (configuration, or
    /// embedding failures in vector mode) are returned as `Err`.
    pub fn ask(&self, question: &str, method: SearchMethod, history: &[ConversationTurn]) -> Result<QueryResponse> {
        if !history.is_empty() {
            tracing::debug!(turns = history.len(), "using conversation memory");
        }
        let retrieval = self.engine.retrieve(question, method, self.top_k)?;
        let degraded = retrieval.degraded;
        let total_chunks_found = retrieval.len();
        let chunks = retrieval.into_chunks();

        let answer = if chunks.is_empty() {
            Generation::NotFound
        } else {
            let context = build_context(&chunks);
            let prompt = build_prompt(self.engine.normalizer(), question, &context, &build_history(history));
            match self.generator.generate(SYSTEM_PROMPT, &prompt) {
                Ok(text) => Generation::Answered { text },
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "answer generation failed");
                    Generation::Failed { reason: format!("{e:#}") }
                }
            }
        };

        Ok(QueryResponse {
            question: question.to_string(),
            method,
            success: answer.is_answered(),
            answer,
            relevant_chunks: chunks.into_iter().take(CONTEXT_CHUNKS).collect(),
            total_chunks_found,
            used_conversation_memory: !history.is_empty(),
            degraded,
            timestamp: Utc::now(),
        })
    }
}
