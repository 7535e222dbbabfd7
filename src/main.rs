//! # News Forge
//!
//! A topic-to-article pipeline that researches a subject across several
//! external sources, composes a news article with an LLM, and persists the
//! result as Markdown and JSON.
//!
//! ## Usage
//!
//! ```sh
//! OPENAI_API_KEY=sk-... news_forge --topic "Quantum Computing"
//! ```
//!
//! ## Architecture
//!
//! One run executes a fixed sequential pipeline over a single record:
//! 1. **Research**: query web search, Wikipedia, arXiv, and a fact-check
//!    service, one after another
//! 2. **Composition**: one model call turning the research summary into a
//!    six-section article
//! 3. **Persistence**: write `{slug}.md` and `{slug}.json` under the output
//!    directory
//!
//! Source and persistence failures degrade gracefully into the record's
//! status message; only a model failure (or missing model credential at
//! startup) aborts the run.

use clap::Parser;
use std::io::{self, Write};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use api::OpenAiCompatClient;
use cli::Cli;
use sources::Sources;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_forge starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.model, "Parsed CLI arguments");

    // Topic comes from the flag or a single interactive prompt; an empty
    // topic never constructs the pipeline.
    let topic = match args.topic.clone() {
        Some(topic) => topic,
        None => match prompt_topic() {
            Ok(topic) => topic,
            Err(e) => {
                eprintln!("Error reading topic: {e}");
                std::process::exit(1);
            }
        },
    };
    let topic = topic.trim().to_string();
    if topic.is_empty() {
        eprintln!("Error: topic cannot be empty.");
        std::process::exit(1);
    }

    // Early check: ensure the output dir is writable before spending any
    // network calls.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(path = %args.output_dir, error = %e, "Output directory is not writable");
        eprintln!("Error: output directory '{}' is not writable: {e}", args.output_dir);
        std::process::exit(1);
    }

    let model = OpenAiCompatClient::new(&args.base_url, &args.model, &args.api_key);
    let sources = Sources::new(args.tavily_api_key.clone(), args.fact_check_api_key.clone());

    match pipeline::run(topic, &sources, &model, &args.output_dir).await {
        Ok(record) => {
            let elapsed = start_time.elapsed();
            info!(
                ?elapsed,
                output_saved = record.output_saved,
                fact_check = %truncate_for_log(&record.fact_check_results, 120),
                "Pipeline run complete"
            );
            println!("{}", record.message);
        }
        Err(e) => {
            error!(error = %e, "Pipeline run failed");
            eprintln!("Error running pipeline: {e}");
            std::process::exit(1);
        }
    }
}

/// Read the topic from stdin with a single interactive prompt.
fn prompt_topic() -> io::Result<String> {
    print!("Enter the topic you want to research: ");
    io::stdout().flush()?;

    let mut topic = String::new();
    io::stdin().read_line(&mut topic)?;
    Ok(topic)
}
