//! Shared plumbing for the `bnrag` and `bnrag-indexer` binaries: argument
//! parsing, logging setup and settings loading.
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bnrag_core::config::{Config, Settings};
use bnrag_core::{Error, SearchMethod};
use bnrag_hybrid::RetrievalEngine;
use tracing_subscriber::EnvFilter;

pub const USAGE: &str = "Usage: bnrag <ask|search|repl|methods|samples|stats> [args...]
  ask \"<question>\" [--method vector|keyword|hybrid] [--top-k N] [--json]
  search \"<query>\" [--method M] [--top-k N]
  repl [--method M] [--top-k N]
  methods
  samples
  stats";

/// Paired Bangla / Banglish questions for trying the engine out.
pub const SAMPLE_QUESTIONS: &[(&str, &str)] = &[
    ("অনুপমের বয়স কত?", "anupamer boyosh koto?"),
    ("কল্যাণীর চরিত্র কেমন?", "kalyani kemon meyer chilo?"),
    ("গল্পের মূল বিষয় কি?", "golper main theme ki?"),
    ("মামার ভূমিকা কি ছিল?", "mamar bhumika ki chilo?"),
    ("অপরিচিতা গল্পের লেখক কে?", "aparichita golper lekhok ke?"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub method: Option<SearchMethod>,
    pub top_k: Option<usize>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ask { question: String, opts: QueryOptions },
    Search { query: String, opts: QueryOptions },
    Repl { opts: QueryOptions },
    Methods,
    Samples,
    Stats,
}

/// Parse everything after the program name.
pub fn parse_command(args: &[String]) -> Result<Command> {
    let (cmd, rest) = args.split_first().ok_or_else(|| anyhow!("missing command\n{USAGE}"))?;
    match cmd.as_str() {
        "ask" => {
            let (positional, opts) = parse_options(rest)?;
            Ok(Command::Ask { question: join_positional(positional, "ask")?, opts })
        }
        "search" => {
            let (positional, opts) = parse_options(rest)?;
            Ok(Command::Search { query: join_positional(positional, "search")?, opts })
        }
        "repl" => {
            let (positional, opts) = parse_options(rest)?;
            if !positional.is_empty() {
                bail!("repl takes no positional arguments");
            }
            Ok(Command::Repl { opts })
        }
        "methods" => Ok(Command::Methods),
        "samples" => Ok(Command::Samples),
        "stats" => Ok(Command::Stats),
        other => bail!("unknown command: {other}\n{USAGE}"),
    }
}

fn join_positional(words: Vec<String>, cmd: &str) -> Result<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        bail!("{cmd} needs a question\n{USAGE}");
    }
    Ok(text)
}

fn parse_options(args: &[String]) -> Result<(Vec<String>, QueryOptions)> {
    let mut positional = Vec::new();
    let mut opts = QueryOptions { method: None, top_k: None, json: false };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--method" | "-m" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("--method requires a value"))?;
                opts.method = Some(SearchMethod::parse(value));
                i += 1;
            }
            "--top-k" | "-k" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("--top-k requires a number"))?;
                let k: usize = value.parse().with_context(|| format!("--top-k requires a number, got {value}"))?;
                if k == 0 {
                    bail!("--top-k must be at least 1");
                }
                opts.top_k = Some(k);
                i += 1;
            }
            "--json" => opts.json = true,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            word => positional.push(word.to_string()),
        }
        i += 1;
    }
    Ok((positional, opts))
}

/// Log to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the default level.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).try_init();
}

/// Settings plus the directory relative data paths resolve against.
pub fn load_settings() -> Result<(Settings, PathBuf)> {
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;
    let base = std::env::current_dir().context("resolving working directory")?;
    tracing::debug!(base = %base.display(), top_k = settings.retrieval.top_k, method = %settings.retrieval.default_method, "settings loaded");
    Ok((settings, base))
}

pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(160).collect();
    if head.len() < text.len() { format!("{head}...") } else { head }
}

/// Output of `bnrag search`. Hybrid shows the per-chunk fusion breakdown; if
/// embedding fails it falls back to the degraded hybrid result like `ask` does.
pub fn render_search(engine: &RetrievalEngine, query: &str, method: SearchMethod, top_k: usize) -> bnrag_core::Result<String> {
    let mut out = String::new();
    if method == SearchMethod::Hybrid {
        match engine.fuse_ranked(query, top_k) {
            Ok(fused) => {
                for (i, hit) in fused.iter().enumerate() {
                    let r = &hit.record;
                    out.push_str(&format!(
                        "{}. [{}] {:.2} (vector {:.1}, keyword {:.0}, bonus {:.0}/{:.0})\n   {}\n",
                        i + 1,
                        hit.chunk.id,
                        hit.score,
                        r.vector_score,
                        r.keyword_score,
                        r.rank_bonus_vector,
                        r.rank_bonus_keyword,
                        preview(&hit.chunk.text)
                    ));
                }
                if fused.is_empty() {
                    out.push_str("No results.\n");
                }
                return Ok(out);
            }
            Err(Error::Embedding(reason)) => {
                tracing::warn!(%reason, "semantic search unavailable, showing keyword matches");
                out.push_str("(semantic search unavailable, showing keyword matches)\n");
            }
            Err(e) => return Err(e),
        }
    }

    let retrieval = engine.retrieve(query, method, top_k)?;
    for (i, hit) in retrieval.hits.iter().enumerate() {
        out.push_str(&format!("{}. [{}] {:.3}\n   {}\n", i + 1, hit.chunk.id, hit.score, preview(&hit.chunk.text)));
    }
    if retrieval.is_empty() {
        out.push_str("No results.\n");
    }
    Ok(out)
}
