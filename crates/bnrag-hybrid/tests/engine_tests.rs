use std::sync::Arc;

use anyhow::anyhow;
use bnrag_core::config::Settings;
use bnrag_core::traits::Embedder;
use bnrag_core::{Chunk, Corpus, Error, SearchMethod, SourceKind};
use bnrag_embed::{FakeEmbedder, FAKE_DIM};
use bnrag_hybrid::RetrievalEngine;
use bnrag_text::TransliterationTable;
use bnrag_vector::{load_or_build, EmbeddingIndex};

struct StubEmbedder {
    vector: Option<Vec<f32>>,
}

impl Embedder for StubEmbedder {
    fn embedder_id(&self) -> &str { "stub" }
    fn dim(&self) -> usize { 2 }
    fn max_len(&self) -> usize { 512 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        match &self.vector {
            Some(v) => Ok(texts.iter().map(|_| v.clone()).collect()),
            None => Err(anyhow!("embedding service unavailable")),
        }
    }
}

/// Unit vector whose cosine with `[1, 0]` is `s`.
fn unit(s: f32) -> Vec<f32> {
    vec![s, (1.0 - s * s).sqrt()]
}

fn engine(chunks: Vec<(u32, &str, Vec<f32>)>, online: bool) -> RetrievalEngine {
    let (chunks, vectors): (Vec<Chunk>, Vec<Vec<f32>>) =
        chunks.into_iter().map(|(id, text, v)| (Chunk::new(id, text), v)).unzip();
    let corpus = Corpus::new(chunks).unwrap();
    let index = if vectors.is_empty() { EmbeddingIndex::empty() } else { EmbeddingIndex::new(vectors).unwrap() };
    let embedder = Arc::new(StubEmbedder { vector: online.then(|| vec![1.0, 0.0]) });
    RetrievalEngine::new(corpus, index, TransliterationTable::builtin().unwrap(), embedder).unwrap()
}

/// Semantic list [A 0.9, B 0.5, C 0.2]; keyword list for "zebra" is [B, D].
fn abcd(online: bool) -> RetrievalEngine {
    engine(
        vec![
            (1, "alpha", unit(0.9)),
            (2, "zebra zebra river", unit(0.5)),
            (3, "gamma", unit(0.2)),
            (4, "a zebra", unit(0.0)),
        ],
        online,
    )
}

fn ids(chunks: impl IntoIterator<Item = Chunk>) -> Vec<u32> {
    chunks.into_iter().map(|c| c.id).collect()
}

#[test]
fn each_method_ranks_its_own_way() {
    let e = abcd(true);
    assert_eq!(ids(e.retrieve_vector("zebra", 5).unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(e.retrieve_keyword("zebra", 5)), vec![2, 4]);

    let hybrid = e.retrieve("zebra", SearchMethod::Hybrid, 5).unwrap();
    assert!(!hybrid.degraded);
    assert_eq!(hybrid.method, SearchMethod::Hybrid);
    assert!(hybrid.hits.iter().all(|h| h.source == SourceKind::Hybrid));
    assert_eq!(ids(hybrid.into_chunks()), vec![1, 2, 3, 4]);
}

#[test]
fn fused_breakdown_shows_both_contributions() {
    let fused = abcd(true).fuse_ranked("zebra", 5).unwrap();
    let b = fused.iter().find(|f| f.chunk.id == 2).unwrap();
    assert!(b.record.vector_score > 0.0);
    assert!(b.record.keyword_score > 0.0);
    let d = fused.iter().find(|f| f.chunk.id == 4).unwrap();
    assert_eq!(d.record.vector_score, 0.0);
    assert!(b.score > d.score);
    assert!(b.score > fused.iter().find(|f| f.chunk.id == 3).unwrap().score);
}

#[test]
fn hybrid_truncates_to_top_k() {
    let e = abcd(true);
    assert_eq!(e.retrieve("zebra", SearchMethod::Hybrid, 2).unwrap().len(), 2);
    assert!(e.retrieve("zebra", SearchMethod::Hybrid, 0).unwrap().is_empty());
}

#[test]
fn hybrid_degrades_to_keyword_when_embedding_fails() {
    let e = abcd(false);
    let out = e.retrieve("zebra", SearchMethod::Hybrid, 5).unwrap();
    assert!(out.degraded);
    assert_eq!(ids(out.into_chunks()), vec![2, 4]);
}

#[test]
fn vector_surfaces_embedding_failure() {
    let err = abcd(false).retrieve("zebra", SearchMethod::Vector, 5).unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    assert!(err.is_retryable());
}

#[test]
fn keyword_ignores_embedding_failure() {
    let out = abcd(false).retrieve("zebra", SearchMethod::Keyword, 5).unwrap();
    assert!(!out.degraded);
    assert_eq!(out.len(), 2);
}

#[test]
fn banglish_keyword_query_finds_bangla_chunk() {
    let e = engine(vec![(0, "অনুপমের বয়স সাতাশ বছর", unit(0.0))], true);
    let out = e.retrieve("anupamer boyosh koto?", SearchMethod::Keyword, 5).unwrap();
    assert_eq!(ids(out.into_chunks()), vec![0]);
}

#[test]
fn empty_corpus_returns_nothing_for_every_method() {
    let e = engine(vec![], false);
    for method in SearchMethod::ALL {
        let out = e.retrieve("anupam", method, 5).unwrap();
        assert!(out.is_empty(), "{method}");
        assert!(!out.degraded);
    }
}

#[test]
fn repeated_queries_are_deterministic() {
    let e = abcd(true);
    let first = ids(e.retrieve("zebra river", SearchMethod::Hybrid, 5).unwrap().into_chunks());
    for _ in 0..5 {
        assert_eq!(ids(e.retrieve("zebra river", SearchMethod::Hybrid, 5).unwrap().into_chunks()), first);
    }
}

#[test]
fn misaligned_index_is_a_config_error() {
    let corpus = Corpus::new(vec![Chunk::new(0, "one"), Chunk::new(1, "two")]).unwrap();
    let index = EmbeddingIndex::new(vec![unit(0.3)]).unwrap();
    let embedder = Arc::new(StubEmbedder { vector: None });
    let err = RetrievalEngine::new(corpus, index, TransliterationTable::builtin().unwrap(), embedder).err().unwrap();
    assert!(matches!(err, Error::Config(_)));
    assert!(!err.is_retryable());
}

#[test]
fn loads_from_settings_with_prebuilt_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("processed_data.json"),
        r#"{"chunks":[{"id":0,"text":"kalyani was fifteen","type":"text"},{"id":1,"text":"the uncle decided everything"}]}"#,
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.embedding.use_fake = true;

    let missing = RetrievalEngine::from_settings(&settings, dir.path()).err().unwrap();
    assert!(matches!(missing, Error::Config(_)), "query path never builds the cache");

    let corpus = Corpus::load(&settings.data.chunks_path(dir.path())).unwrap();
    load_or_build(&settings.data.embeddings_path(dir.path()), &corpus, &FakeEmbedder::new(FAKE_DIM), 8, false).unwrap();

    let e = RetrievalEngine::from_settings(&settings, dir.path()).unwrap();
    let stats = e.stats();
    assert_eq!(stats.total_chunks, 2);
    assert_eq!(stats.embedding_dimensions, FAKE_DIM);
    assert!(stats.transliteration_entries > 0);

    let out = e.retrieve("uncle", SearchMethod::Keyword, 5).unwrap();
    assert_eq!(ids(out.into_chunks()), vec![1]);
}
