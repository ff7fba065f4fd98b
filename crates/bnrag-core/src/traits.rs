//! Seams to the opaque collaborators: the embedding model and the generative model.

pub trait Embedder: Send + Sync {
    /// Stable identifier for the model (e.g. `bert:paraphrase-multilingual-MiniLM-L12-v2:d384`).
    fn embedder_id(&self) -> &str;
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    /// Must be deterministic for identical input text and model.
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))
    }
}

pub trait Generator: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}
