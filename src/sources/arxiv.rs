//! arXiv export API adapter.
//!
//! Queries the export search endpoint for the topic and keeps the head of
//! the raw Atom response as the research snippet. The body is deliberately
//! not parsed as XML: the first kilobyte of the feed already carries the
//! top entry's title and abstract, which is all the summary needs.

use crate::utils::truncate_chars;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, instrument, warn};

const ARXIV_QUERY_URL: &str = "http://export.arxiv.org/api/query";

/// Cap on the raw response kept for the summary, in characters.
const MAX_SNIPPET_CHARS: usize = 1000;

/// Query the preprint archive for a topic.
///
/// Returns at most the first [`MAX_SNIPPET_CHARS`] characters of the raw
/// response, or an empty string on any failure.
#[instrument(level = "info", skip_all, fields(topic = %topic))]
pub async fn search(client: &Client, topic: &str) -> String {
    match fetch(client, topic).await {
        Ok(snippet) => {
            debug!(chars = snippet.chars().count(), "arXiv snippet assembled");
            snippet
        }
        Err(e) => {
            warn!(error = %e, "arXiv query failed; continuing without it");
            String::new()
        }
    }
}

async fn fetch(client: &Client, topic: &str) -> Result<String, Box<dyn Error>> {
    let response = client
        .get(ARXIV_QUERY_URL)
        .query(&[
            ("search_query", format!("all:{topic}").as_str()),
            ("max_results", "1"),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    Ok(truncate_chars(&body, MAX_SNIPPET_CHARS))
}
