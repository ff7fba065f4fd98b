use std::fs;

use figment::providers::{Format, Toml};
use figment::Figment;
use tempfile::TempDir;

use bnrag_core::config::{resolve_with_base, Config};
use bnrag_core::{Chunk, Corpus, Error, SearchMethod};

#[test]
fn corpus_load_reads_processed_data() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("processed_data.json");
    fs::write(
        &path,
        r#"{"chunks": [
            {"id": 0, "text": "অনুপমের বয়স সাতাশ বছর", "type": "story"},
            {"id": 1, "text": "কল্যাণী শিক্ষিত মেয়ে"}
        ]}"#,
    )
    .unwrap();

    let corpus = Corpus::load(&path).expect("load");
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.chunks()[0].kind, "story");
    assert_eq!(corpus.chunks()[1].kind, "text", "missing type falls back to text");
    assert_eq!(corpus.get(1).map(|c| c.id), Some(1));
}

#[test]
fn corpus_missing_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let err = Corpus::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
    assert!(!err.is_retryable());
}

#[test]
fn corpus_rejects_duplicate_ids_and_empty_text() {
    let dup = Corpus::new(vec![Chunk::new(3, "a"), Chunk::new(3, "b")]);
    assert!(matches!(dup, Err(Error::Config(_))));

    let blank = Corpus::new(vec![Chunk::new(0, "   ")]);
    assert!(matches!(blank, Err(Error::Config(_))));
}

#[test]
fn corpus_fingerprint_material_tracks_text() {
    let a = Corpus::new(vec![Chunk::new(0, "one")]).unwrap();
    let b = Corpus::new(vec![Chunk::new(0, "two")]).unwrap();
    assert_ne!(a.fingerprint_material(), b.fingerprint_material());
}

#[test]
fn search_method_parse_falls_back_to_hybrid() {
    assert_eq!(SearchMethod::parse("vector"), SearchMethod::Vector);
    assert_eq!(SearchMethod::parse("Keyword"), SearchMethod::Keyword);
    assert_eq!(SearchMethod::parse("lexical"), SearchMethod::Keyword);
    assert_eq!(SearchMethod::parse("hybrid"), SearchMethod::Hybrid);
    assert_eq!(SearchMethod::parse("bm25"), SearchMethod::Hybrid);
    assert_eq!(SearchMethod::parse(""), SearchMethod::Hybrid);
    assert_eq!(SearchMethod::default(), SearchMethod::Hybrid);
}

#[test]
fn settings_defaults_and_overrides() {
    let config = Config::from_figment(Figment::new().merge(Toml::string(
        r#"
        [retrieval]
        top_k = 3
        default_method = "keyword"

        [data]
        chunks_path = "data/chunks.json"
        "#,
    )));
    let settings = config.settings().expect("settings");
    assert_eq!(settings.retrieval.top_k, 3);
    assert_eq!(settings.retrieval.default_method, SearchMethod::Keyword);
    assert_eq!(settings.data.embeddings_path, "embeddings.json");
    assert_eq!(settings.generation.model, "gpt-4o-mini");
    assert_eq!(settings.embedding.batch_size, 32);

    let top_k: usize = config.get("retrieval.top_k").unwrap();
    assert_eq!(top_k, 3);
}

#[test]
fn default_method_accepts_aliases_and_unknown_names() {
    for (raw, expected) in [
        ("semantic", SearchMethod::Vector),
        ("Vector", SearchMethod::Vector),
        ("LEXICAL", SearchMethod::Keyword),
        ("bm25", SearchMethod::Hybrid),
    ] {
        let toml = format!("[retrieval]\ndefault_method = \"{raw}\"\n");
        let config = Config::from_figment(Figment::new().merge(Toml::string(&toml)));
        let settings = config.settings().unwrap_or_else(|e| panic!("{raw}: {e}"));
        assert_eq!(settings.retrieval.default_method, expected, "{raw}");
    }
}

#[test]
fn search_method_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&SearchMethod::Keyword).unwrap(), "\"keyword\"");
    let back: SearchMethod = serde_json::from_str("\"Keyword\"").unwrap();
    assert_eq!(back, SearchMethod::Keyword);
}

#[test]
fn settings_reject_zero_top_k() {
    let config = Config::from_figment(Figment::new().merge(Toml::string("[retrieval]\ntop_k = 0\n")));
    assert!(matches!(config.settings(), Err(Error::Config(_))));
}

#[test]
fn resolve_with_base_keeps_absolute_paths() {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();
    assert_eq!(resolve_with_base(base, "chunks.json"), base.join("chunks.json"));
    let abs = base.join("abs.json");
    assert_eq!(resolve_with_base(base, abs.to_string_lossy()), abs);
}
