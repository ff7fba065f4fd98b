use std::sync::Arc;

use anyhow::anyhow;
use bnrag_cli::{render_search, SAMPLE_QUESTIONS};
use bnrag_core::traits::Embedder;
use bnrag_core::{Chunk, Corpus, SearchMethod};
use bnrag_hybrid::RetrievalEngine;
use bnrag_text::TransliterationTable;
use bnrag_vector::EmbeddingIndex;

struct StubEmbedder {
    online: bool,
}

impl Embedder for StubEmbedder {
    fn embedder_id(&self) -> &str { "stub" }
    fn dim(&self) -> usize { 2 }
    fn max_len(&self) -> usize { 512 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        if self.online {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        } else {
            Err(anyhow!("embedding service unavailable"))
        }
    }
}

fn engine(online: bool) -> RetrievalEngine {
    let corpus = Corpus::new(vec![Chunk::new(0, "the uncle arranged the wedding"), Chunk::new(1, "a quiet train station")]).unwrap();
    let index = EmbeddingIndex::new(vec![vec![0.0, 1.0], vec![0.8, 0.6]]).unwrap();
    RetrievalEngine::new(corpus, index, TransliterationTable::builtin().unwrap(), Arc::new(StubEmbedder { online })).unwrap()
}

#[test]
fn hybrid_search_shows_fusion_breakdown() {
    let out = render_search(&engine(true), "wedding", SearchMethod::Hybrid, 5).unwrap();
    assert!(out.starts_with("1. [1] "), "{out}");
    assert!(out.contains("2. [0] "), "{out}");
    assert!(out.contains("(vector 0.0, keyword 10, bonus 0/1)"), "{out}");
}

#[test]
fn hybrid_search_degrades_when_embedding_fails() {
    let out = render_search(&engine(false), "wedding", SearchMethod::Hybrid, 5).unwrap();
    assert!(out.starts_with("(semantic search unavailable, showing keyword matches)\n"), "{out}");
    assert!(out.contains("1. [0] "), "{out}");
    assert!(!out.contains("[1]"), "{out}");
}

#[test]
fn vector_search_still_reports_embedding_failure() {
    assert!(render_search(&engine(false), "wedding", SearchMethod::Vector, 5).is_err());
}

#[test]
fn empty_search_says_so_for_every_method() {
    let out = render_search(&engine(true), "submarine", SearchMethod::Keyword, 5).unwrap();
    assert_eq!(out, "No results.\n");

    let empty = RetrievalEngine::new(
        Corpus::empty(),
        EmbeddingIndex::empty(),
        TransliterationTable::builtin().unwrap(),
        Arc::new(StubEmbedder { online: true }),
    )
    .unwrap();
    for method in SearchMethod::ALL {
        assert_eq!(render_search(&empty, "wedding", method, 5).unwrap(), "No results.\n", "{method}");
    }

    let offline = render_search(&engine(false), "submarine", SearchMethod::Hybrid, 5).unwrap();
    assert!(offline.ends_with("No results.\n"), "{offline}");
}

#[test]
fn sample_questions_pair_bangla_with_banglish() {
    assert_eq!(SAMPLE_QUESTIONS.len(), 5);
    for (bangla, banglish) in SAMPLE_QUESTIONS {
        assert!(!bangla.is_ascii());
        assert!(banglish.is_ascii());
    }
}
