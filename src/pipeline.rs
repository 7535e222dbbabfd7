//! The three pipeline steps and their sequential orchestrator.
//!
//! Control flow is a fixed three-node line with no branching, retries, or
//! fan-out: research → composition → persistence. Each step returns only the
//! fields it owns and the orchestrator merges them into the single
//! [`ResearchRecord`] for the run.
//!
//! # Failure Policy
//!
//! - Research: no failure path. Adapter outages degrade to fallback strings
//!   inside the adapters, so a (possibly sparse) summary is always produced.
//! - Composition: a model failure is fatal and propagates to the caller.
//! - Persistence: I/O failures are absorbed into `output_saved = false` and
//!   an explanatory `message`; the run still completes.

use crate::api::TextModel;
use crate::models::{ArticleDocument, PersistOutcome, ResearchFindings, ResearchRecord};
use crate::outputs::{json, markdown};
use crate::sources::Sources;
use crate::utils::{topic_slug, truncate_for_log};
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Article text stored when the composition step receives an empty research
/// summary.
pub const NO_RESEARCH_DATA: &str = "No research data available.";

/// Run the full pipeline for a topic and return the finished record.
///
/// The caller reads the record's `message` for the human-facing outcome.
///
/// # Errors
///
/// Only a composition (model) failure aborts the run; every other failure is
/// reported through the record.
#[instrument(level = "info", skip_all, fields(topic = %topic))]
pub async fn run<M: TextModel>(
    topic: String,
    sources: &Sources,
    model: &M,
    output_dir: &str,
) -> Result<ResearchRecord, Box<dyn Error>> {
    let mut record = ResearchRecord::new(topic);

    let findings = research_step(sources, &record.topic).await;
    record.research_summary = findings.research_summary;
    record.fact_check_results = findings.fact_check_results;

    record.article = compose_step(model, &record.research_summary).await?;

    let outcome = persist_step(&record, output_dir).await;
    record.output_saved = outcome.output_saved;
    record.message = outcome.message;

    Ok(record)
}

/// Query the four source adapters in fixed order and assemble the findings.
///
/// Order is web search, encyclopedia, preprint, fact-check — sequential and
/// deterministic. The summary keeps all three labels even when a segment
/// came back empty.
#[instrument(level = "info", skip_all)]
pub async fn research_step(sources: &Sources, topic: &str) -> ResearchFindings {
    let web = sources.search_web(topic).await;
    let wiki = sources.search_wikipedia(topic).await;
    let arxiv = sources.search_arxiv(topic).await;
    let fact_check_results = sources.fact_check(topic).await;

    let research_summary = build_research_summary(&web, &wiki, &arxiv);
    info!(
        summary_bytes = research_summary.len(),
        fact_check = %truncate_for_log(&fact_check_results, 120),
        "Research step complete"
    );

    ResearchFindings {
        research_summary,
        fact_check_results,
    }
}

/// Assemble the labeled research summary from the three content adapters.
pub fn build_research_summary(web: &str, wiki: &str, arxiv: &str) -> String {
    format!("Google: {web}\n\nWikipedia: {wiki}\n\nArxiv: {arxiv}")
}

/// Compose the article from the research summary with a single model call.
///
/// An empty (whole-string trimmed) summary short-circuits to the
/// [`NO_RESEARCH_DATA`] sentinel without invoking the model. Note that once
/// the research step has run, the summary carries its fixed labels and is
/// never whitespace-only, so a sparse research result still reaches the
/// model; the guard protects against callers composing from a blank record.
#[instrument(level = "info", skip_all)]
pub async fn compose_step<M: TextModel>(
    model: &M,
    research_summary: &str,
) -> Result<String, Box<dyn Error>> {
    if research_summary.trim().is_empty() {
        info!("Research summary is empty; skipping model call");
        return Ok(NO_RESEARCH_DATA.to_string());
    }

    let prompt = article_prompt(research_summary);
    debug!(prompt_bytes = prompt.len(), "Invoking model for article composition");
    let article = model.complete(&prompt).await?;
    let article = article.trim().to_string();
    info!(article_bytes = article.len(), "Composition step complete");
    Ok(article)
}

/// Build the single composition prompt with the six mandatory sections.
fn article_prompt(research_summary: &str) -> String {
    format!(
        "Based on the following research, write a compelling and detailed news article:\n\
         \n\
         {research_summary}\n\
         \n\
         **Ensure the article follows this format:**\n\
         - **Title**\n\
         - **Introduction**\n\
         - **Key Insights**\n\
         - **Industry Impact**\n\
         - **Future Prospects**\n\
         - **Conclusion**\n\
         \n\
         Include relevant facts and ensure clarity."
    )
}

/// Write the Markdown and JSON artifacts for a finished record.
///
/// An empty (trimmed) article writes nothing and reports a warning message.
/// Write failures are converted into the outcome rather than returned, so
/// the run always finishes with a coherent record.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn persist_step(record: &ResearchRecord, output_dir: &str) -> PersistOutcome {
    let slug = topic_slug(&record.topic);

    if record.article.trim().is_empty() {
        warn!("No article content to save");
        return PersistOutcome {
            output_saved: false,
            message: "No article content to save.".to_string(),
        };
    }

    match write_artifacts(record, output_dir, &slug).await {
        Ok(()) => PersistOutcome {
            output_saved: true,
            message: format!("Research and article saved as {slug}.md and {slug}.json"),
        },
        Err(e) => {
            warn!(error = %e, "Failed to persist output");
            PersistOutcome {
                output_saved: false,
                message: format!("Error saving output: {e}"),
            }
        }
    }
}

async fn write_artifacts(
    record: &ResearchRecord,
    output_dir: &str,
    slug: &str,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;

    markdown::write_article(output_dir, slug, &record.article).await?;

    let document = ArticleDocument {
        topic: slug.to_string(),
        research_summary: record.research_summary.clone(),
        article: record.article.clone(),
    };
    json::write_document(output_dir, slug, &document).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Model stub that records how often it was invoked.
    struct StubModel {
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: &str) -> Self {
            Self {
                reply: Err(error.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextModel for StubModel {
        async fn complete(&self, _prompt: &str) -> Result<String, Box<dyn Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(e) => Err(e.clone().into()),
            }
        }
    }

    fn record_with(topic: &str, summary: &str, article: &str) -> ResearchRecord {
        let mut record = ResearchRecord::new(topic);
        record.research_summary = summary.to_string();
        record.article = article.to_string();
        record
    }

    #[test]
    fn test_build_research_summary_labels_in_order() {
        let summary = build_research_summary("a", "b", "c");
        assert_eq!(summary, "Google: a\n\nWikipedia: b\n\nArxiv: c");

        let google = summary.find("Google:").unwrap();
        let wikipedia = summary.find("Wikipedia:").unwrap();
        let arxiv = summary.find("Arxiv:").unwrap();
        assert!(google < wikipedia && wikipedia < arxiv);
    }

    #[test]
    fn test_build_research_summary_keeps_empty_segments() {
        assert_eq!(
            build_research_summary("", "", ""),
            "Google: \n\nWikipedia: \n\nArxiv: "
        );
    }

    #[tokio::test]
    async fn test_compose_step_empty_summary_skips_model() {
        let model = StubModel::replying("should not be used");

        let article = compose_step(&model, "   \n\t ").await.unwrap();

        assert_eq!(article, NO_RESEARCH_DATA);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compose_step_all_empty_adapters_still_invokes_model() {
        // With labels present the summary is never whitespace-only, so even
        // a fully sparse research result reaches the model.
        let model = StubModel::replying("An article.");
        let summary = build_research_summary("", "", "");

        let article = compose_step(&model, &summary).await.unwrap();

        assert_eq!(article, "An article.");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_compose_step_trims_model_reply() {
        let model = StubModel::replying("\n  The article.  \n");

        let article = compose_step(&model, "Google: x\n\nWikipedia: y\n\nArxiv: z")
            .await
            .unwrap();

        assert_eq!(article, "The article.");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_compose_step_model_failure_propagates() {
        let model = StubModel::failing("backend unreachable");

        let result = compose_step(&model, "Google: x\n\nWikipedia: y\n\nArxiv: z").await;

        let error = result.unwrap_err();
        assert!(error.to_string().contains("backend unreachable"));
    }

    #[tokio::test]
    async fn test_persist_step_empty_article_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let record = record_with("Quantum Computing", "summary", "  \n ");

        let outcome = persist_step(&record, dir_str).await;

        assert!(!outcome.output_saved);
        assert_eq!(outcome.message, "No article content to save.");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_persist_step_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let record = record_with(
            "Quantum Computing",
            "Google: a\n\nWikipedia: b\n\nArxiv: c",
            "Qubits ahead.",
        );

        let outcome = persist_step(&record, dir_str).await;

        assert!(outcome.output_saved);
        assert_eq!(
            outcome.message,
            "Research and article saved as Quantum_Computing.md and Quantum_Computing.json"
        );

        let md = std::fs::read_to_string(dir.path().join("Quantum_Computing.md")).unwrap();
        assert!(md.starts_with("# Quantum_Computing"));
        assert!(md.ends_with("Qubits ahead."));

        let json_text =
            std::fs::read_to_string(dir.path().join("Quantum_Computing.json")).unwrap();
        let parsed: ArticleDocument = serde_json::from_str(&json_text).unwrap();
        assert_eq!(parsed.topic, "Quantum_Computing");
        assert_eq!(parsed.research_summary, record.research_summary);
        assert_eq!(parsed.article, "Qubits ahead.");
    }

    #[tokio::test]
    async fn test_persist_step_overwrite_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let record = record_with("Quantum Computing", "summary", "Same article.");

        let first = persist_step(&record, dir_str).await;
        let md_first = std::fs::read(dir.path().join("Quantum_Computing.md")).unwrap();
        let json_first = std::fs::read(dir.path().join("Quantum_Computing.json")).unwrap();

        let second = persist_step(&record, dir_str).await;
        let md_second = std::fs::read(dir.path().join("Quantum_Computing.md")).unwrap();
        let json_second = std::fs::read(dir.path().join("Quantum_Computing.json")).unwrap();

        assert!(first.output_saved && second.output_saved);
        assert_eq!(md_first, md_second);
        assert_eq!(json_first, json_second);
    }

    #[tokio::test]
    async fn test_persist_step_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = format!("{}/nested/out", dir.path().display());
        let record = record_with("Topic", "summary", "Article.");

        let outcome = persist_step(&record, &nested).await;

        assert!(outcome.output_saved);
        assert!(std::path::Path::new(&nested).join("Topic.md").is_file());
    }

    #[tokio::test]
    async fn test_persist_step_unwritable_dir_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be forces create_dir_all
        // to fail.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "file in the way").unwrap();
        let record = record_with("Topic", "summary", "Article.");

        let outcome = persist_step(&record, blocked.to_str().unwrap()).await;

        assert!(!outcome.output_saved);
        assert!(outcome.message.starts_with("Error saving output:"));
    }

    #[test]
    fn test_article_prompt_lists_sections_in_order() {
        let prompt = article_prompt("research body");
        assert!(prompt.contains("research body"));

        let sections = [
            "**Title**",
            "**Introduction**",
            "**Key Insights**",
            "**Industry Impact**",
            "**Future Prospects**",
            "**Conclusion**",
        ];
        let mut last = 0;
        for section in sections {
            let at = prompt.find(section).unwrap();
            assert!(at > last, "{section} out of order");
            last = at;
        }
    }
}
