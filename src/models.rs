//! Data models for the research-to-article pipeline.
//!
//! This module defines the core data structures threaded through the pipeline:
//! - [`ResearchRecord`]: the single mutable record accumulating each step's output
//! - [`ResearchFindings`]: fields owned by the research step
//! - [`PersistOutcome`]: fields owned by the persistence step
//! - [`ArticleDocument`]: the shape of the JSON artifact written to disk
//!
//! Every field of [`ResearchRecord`] has exactly one writer (the step that
//! owns it), except `message`, which the last step to report overwrites.

use serde::{Deserialize, Serialize};

/// The single record flowing through a pipeline run.
///
/// Created once at pipeline entry from the user's topic and extended by each
/// step in sequence. The record itself is never persisted; only the Markdown
/// and JSON artifacts derived from it are.
#[derive(Debug)]
pub struct ResearchRecord {
    /// The topic under research. Set once at entry, never mutated.
    pub topic: String,
    /// Labeled concatenation of source adapter outputs. Empty until the
    /// research step completes.
    pub research_summary: String,
    /// The fact-check adapter's verdict text. Empty until the research step
    /// completes.
    pub fact_check_results: String,
    /// The generated article, or a sentinel when no research data was
    /// available. Empty until the composition step completes.
    pub article: String,
    /// True once both output files were written successfully.
    pub output_saved: bool,
    /// Human-readable status from the last step that reported. Overwritten,
    /// never appended.
    pub message: String,
}

impl ResearchRecord {
    /// Create a fresh record for a topic with all other fields empty.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            research_summary: String::new(),
            fact_check_results: String::new(),
            article: String::new(),
            output_saved: false,
            message: String::new(),
        }
    }
}

/// Output owned by the research step: the summary and the fact-check text.
#[derive(Debug)]
pub struct ResearchFindings {
    pub research_summary: String,
    pub fact_check_results: String,
}

/// Output owned by the persistence step: whether files landed, and the
/// status message to surface to the caller.
#[derive(Debug)]
pub struct PersistOutcome {
    pub output_saved: bool,
    pub message: String,
}

/// The JSON artifact written alongside the Markdown article.
///
/// `topic` holds the filesystem slug rather than the raw topic so the
/// document names itself consistently with the files it lives in.
#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleDocument {
    pub topic: String,
    pub research_summary: String,
    pub article: String,
}
