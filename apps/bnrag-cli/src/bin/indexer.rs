use std::env;

use bnrag_cli::{init_tracing, load_settings};
use bnrag_core::Corpus;
use bnrag_embed::get_default_embedder;
use bnrag_vector::load_or_build;

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let mut force = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Usage: bnrag-indexer [--force]");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let (settings, base) = load_settings()?;
    let chunks_path = settings.data.chunks_path(&base);
    let cache_path = settings.data.embeddings_path(&base);
    println!("bnrag indexer\n=============");
    println!("Chunks:     {}", chunks_path.display());
    println!("Embeddings: {}", cache_path.display());

    let corpus = Corpus::load(&chunks_path)?;
    let embedder = get_default_embedder(&settings.embedding)?;
    let index = load_or_build(&cache_path, &corpus, embedder.as_ref(), settings.embedding.batch_size, force)?;

    println!("\n✅ {} chunks, {}-dimensional vectors ({})", index.len(), index.dim(), embedder.embedder_id());
    Ok(())
}
