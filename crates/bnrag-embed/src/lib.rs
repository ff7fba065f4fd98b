//! bnrag-embed
//!
//! Local sentence embedders behind `bnrag_core::traits::Embedder`:
//! a candle BERT encoder (paraphrase-multilingual-MiniLM layout) with masked
//! mean pooling, and a hashed bag-of-words `FakeEmbedder` for tests and
//! offline development (`APP_USE_FAKE_EMBEDDINGS=1`).
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;

use bnrag_core::config::{expand_path, EmbeddingSettings};
use bnrag_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use device::select_device;
pub use pool::masked_mean_l2;
pub use tokenize::tokenize_on_device;

pub const DEFAULT_MODEL_NAME: &str = "paraphrase-multilingual-MiniLM-L12-v2";
pub const FAKE_DIM: usize = 384;

pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    id: String,
    dim: usize,
    max_len: usize,
    pad_id: u32,
}

impl BertEmbedder {
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "loading sentence encoder");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&config_path).with_context(|| format!("reading {}", config_path.display()))?,
        )?;
        let dim = raw.get("hidden_size").and_then(|v| v.as_u64()).ok_or_else(|| anyhow!("config.json has no hidden_size"))? as usize;
        let pad_id = raw.get("pad_token_id").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        let config: BertConfig = serde_json::from_value(raw)?;

        let weights = load_weights(model_dir, &device)?;
        let vb = VarBuilder::from_tensors(weights, DTYPE, &device);
        let model = BertModel::load(vb, &config)?;

        let name = model_dir.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
        let id = format!("bert:{}:d{}", name, dim);
        tracing::info!(id = %id, "sentence encoder ready");
        Ok(Self { model, tokenizer, device, id, dim, max_len, pad_id })
    }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize_on_device(&self.tokenizer, text, self.max_len, self.pad_id, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let v: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if v.len() != self.dim {
            return Err(anyhow!("encoder produced {} dims, expected {}", v.len(), self.dim));
        }
        let elapsed = start.elapsed();
        if elapsed.as_millis() > 250 {
            tracing::debug!(ms = elapsed.as_millis() as u64, "slow embedding");
        }
        Ok(v)
    }
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        return Ok(candle_core::safetensors::load(&safetensors, device)?);
    }
    let pickle = model_dir.join("pytorch_model.bin");
    if pickle.exists() {
        return Ok(candle_core::pickle::read_all(&pickle)?.into_iter().collect());
    }
    Err(anyhow!("no model.safetensors or pytorch_model.bin in {}", model_dir.display()))
}

impl Embedder for BertEmbedder {
    fn embedder_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}

/// Deterministic hashed bag-of-words vectors. Shared lower-cased tokens give
/// positive cosine similarity, which is enough to exercise ranking offline.
pub struct FakeEmbedder {
    dim: usize,
    id: String,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim, id: format!("fake:xxh64:d{}", dim) }
    }

    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for token in text.split_whitespace() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            v[idx] += 0.5 + (((h >> 32) as u32) as f32) / (u32::MAX as f32);
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v { *x /= norm; }
        }
        v
    }
}

impl Embedder for FakeEmbedder {
    fn embedder_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { usize::MAX }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

fn fake_requested() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

pub fn get_default_embedder(settings: &EmbeddingSettings) -> Result<Box<dyn Embedder>> {
    if settings.use_fake || fake_requested() {
        tracing::info!(dim = FAKE_DIM, "using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(FAKE_DIM)));
    }
    let dir = resolve_model_dir(settings.model_dir.as_deref())?;
    Ok(Box::new(BertEmbedder::load(&dir, settings.max_len)?))
}

pub fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") {
        let p = expand_path(&dir);
        if p.exists() { return Ok(p); }
        tracing::warn!(dir = %p.display(), "APP_MODEL_DIR does not exist");
    }
    if let Some(dir) = configured {
        let p = expand_path(dir);
        if p.exists() { return Ok(p); }
        tracing::warn!(dir = %p.display(), "configured embedding.model_dir does not exist");
    }
    for candidate in [format!("models/{DEFAULT_MODEL_NAME}"), format!("../models/{DEFAULT_MODEL_NAME}")] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Ok(p); }
    }
    Err(anyhow!("Could not locate the {} model directory (set APP_MODEL_DIR or embedding.model_dir)", DEFAULT_MODEL_NAME))
}
