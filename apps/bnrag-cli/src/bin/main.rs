use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use bnrag_cli::{init_tracing, load_settings, parse_command, preview, render_search, Command, QueryOptions, SAMPLE_QUESTIONS};
use bnrag_core::config::Settings;
use bnrag_core::{ConversationTurn, SearchMethod};
use bnrag_hybrid::{AnswerPipeline, OpenAiGenerator, QueryResponse, RetrievalEngine};

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    };

    match command {
        Command::Methods => {
            for method in SearchMethod::ALL {
                println!("{:<8} {}", method.as_str(), method.description());
            }
            return Ok(());
        }
        Command::Samples => {
            for (bangla, banglish) in SAMPLE_QUESTIONS {
                println!("{bangla}\n  {banglish}");
            }
            return Ok(());
        }
        _ => {}
    }

    let (settings, base) = load_settings()?;
    let engine = Arc::new(RetrievalEngine::from_settings(&settings, &base)?);

    match command {
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&engine.stats())?);
        }
        Command::Search { query, opts } => {
            let (method, top_k) = resolve(&settings, &opts);
            print!("{}", render_search(&engine, &query, method, top_k)?);
        }
        Command::Ask { question, opts } => {
            let (method, top_k) = resolve(&settings, &opts);
            let pipeline = AnswerPipeline::new(engine, OpenAiGenerator::from_settings(&settings.generation)?, top_k);
            let resp = pipeline.ask(&question, method, &[])?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                print_response(&resp);
            }
        }
        Command::Repl { opts } => {
            let (method, top_k) = resolve(&settings, &opts);
            let pipeline = AnswerPipeline::new(engine, OpenAiGenerator::from_settings(&settings.generation)?, top_k);
            repl(&pipeline, method)?;
        }
        Command::Methods | Command::Samples => {}
    }
    Ok(())
}

fn resolve(settings: &Settings, opts: &QueryOptions) -> (SearchMethod, usize) {
    (opts.method.unwrap_or(settings.retrieval.default_method), opts.top_k.unwrap_or(settings.retrieval.top_k))
}

fn print_response(resp: &QueryResponse) {
    println!("{}", resp.answer.display_text());
    if resp.degraded {
        println!("\n(semantic search unavailable, answered from keyword matches)");
    }
    if !resp.relevant_chunks.is_empty() {
        println!("\nSources ({} found):", resp.total_chunks_found);
        for chunk in &resp.relevant_chunks {
            println!("  [{}] {}", chunk.id, preview(&chunk.text));
        }
    }
}

/// Interactive loop. `:method <m>` switches method, `:clear` drops history,
/// `:quit` or EOF exits.
fn repl(pipeline: &AnswerPipeline<OpenAiGenerator>, mut method: SearchMethod) -> anyhow::Result<()> {
    let mut history: Vec<ConversationTurn> = Vec::new();
    let stdin = io::stdin();
    println!("bnrag ({method}). Ask in Bangla, Banglish or English; :quit to exit.");
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":clear" => {
                history.clear();
                println!("history cleared");
                continue;
            }
            _ => {}
        }
        if let Some(name) = line.strip_prefix(":method") {
            method = SearchMethod::parse(name);
            println!("method: {method}");
            continue;
        }
        match pipeline.ask(line, method, &history) {
            Ok(resp) => {
                print_response(&resp);
                if resp.success {
                    history.push(resp.to_turn());
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
        println!();
    }
    Ok(())
}
