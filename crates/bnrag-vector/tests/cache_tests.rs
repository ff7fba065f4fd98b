use bnrag_core::traits::Embedder;
use bnrag_core::{Chunk, Corpus, Error};
use bnrag_embed::FakeEmbedder;
use bnrag_vector::{load_existing, load_or_build, EmbeddingCache};
use tempfile::TempDir;

fn corpus(texts: &[&str]) -> Corpus {
    Corpus::new(texts.iter().enumerate().map(|(i, t)| Chunk::new(i as u32, *t)).collect()).unwrap()
}

#[test]
fn builds_once_then_loads() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cache/embeddings.json");
    let corpus = corpus(&["অনুপমের বয়স সাতাশ বছর", "kalyani is educated", "mama is greedy"]);
    let embedder = FakeEmbedder::new(32);

    let built = load_or_build(&path, &corpus, &embedder, 2, false).expect("build");
    assert_eq!(built.len(), 3);
    assert_eq!(built.dim(), 32);
    assert!(path.exists());

    let first = EmbeddingCache::load(&path).unwrap().expect("cache present");
    let loaded = load_or_build(&path, &corpus, &embedder, 2, false).expect("load");
    let second = EmbeddingCache::load(&path).unwrap().expect("cache present");
    assert_eq!(first.created_at, second.created_at, "cache is not rewritten on load");
    for (a, b) in loaded.vectors().iter().flatten().zip(built.vectors().iter().flatten()) {
        assert!((a - b).abs() < 1e-6);
    }
    assert_eq!(first.embedder_id, embedder.embedder_id());
}

#[test]
fn stale_corpus_is_config_error_unless_forced() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("embeddings.json");
    let embedder = FakeEmbedder::new(16);
    load_or_build(&path, &corpus(&["one", "two"]), &embedder, 8, false).unwrap();

    let changed = corpus(&["one", "three"]);
    assert!(matches!(load_or_build(&path, &changed, &embedder, 8, false), Err(Error::Config(_))));
    let rebuilt = load_or_build(&path, &changed, &embedder, 8, true).expect("forced rebuild");
    assert_eq!(rebuilt.len(), 2);
    assert!(load_existing(&path, &changed, embedder.embedder_id()).is_ok());
}

#[test]
fn other_embedder_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("embeddings.json");
    let c = corpus(&["one"]);
    load_or_build(&path, &c, &FakeEmbedder::new(16), 8, false).unwrap();
    assert!(matches!(load_existing(&path, &c, "bert:other:d384"), Err(Error::Config(_))));
}

#[test]
fn missing_cache_is_config_error_on_query_path() {
    let tmp = TempDir::new().unwrap();
    let err = load_existing(&tmp.path().join("missing.json"), &corpus(&["one"]), "fake").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn truncated_vectors_fail_validation() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("embeddings.json");
    let c = corpus(&["one", "two"]);
    let embedder = FakeEmbedder::new(4);
    load_or_build(&path, &c, &embedder, 8, false).unwrap();

    let mut cache = EmbeddingCache::load(&path).unwrap().unwrap();
    cache.vectors.pop();
    cache.store(&path).unwrap();
    assert!(matches!(load_existing(&path, &c, embedder.embedder_id()), Err(Error::Config(_))));
}

#[test]
fn empty_corpus_builds_empty_index() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("embeddings.json");
    let index = load_or_build(&path, &Corpus::empty(), &FakeEmbedder::new(8), 8, false).unwrap();
    assert!(index.is_empty());
}
