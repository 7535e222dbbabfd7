//! Tavily web search adapter.
//!
//! Sends the topic to Tavily's search API requesting advanced search depth
//! with synthesized answers, then joins the content of up to the first three
//! results into one snippet. Any failure (missing key, transport error,
//! malformed body) collapses to an empty string so the research summary
//! simply loses its web segment.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{debug, instrument, warn};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// How many ranked results feed the snippet.
const MAX_RESULTS: usize = 3;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    include_answers: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    content: Option<String>,
}

/// Query the web search provider for a topic.
///
/// Returns the joined snippet, or an empty string when no key is configured,
/// the call fails, or no result carries content.
#[instrument(level = "info", skip_all, fields(topic = %topic))]
pub async fn search(client: &Client, api_key: Option<&str>, topic: &str) -> String {
    let Some(api_key) = api_key else {
        warn!("No Tavily API key configured; skipping web search");
        return String::new();
    };

    match fetch(client, api_key, topic).await {
        Ok(snippet) => {
            debug!(bytes = snippet.len(), "Web search snippet assembled");
            snippet
        }
        Err(e) => {
            warn!(error = %e, "Web search failed; continuing without it");
            String::new()
        }
    }
}

async fn fetch(client: &Client, api_key: &str, topic: &str) -> Result<String, Box<dyn Error>> {
    let request = SearchRequest {
        api_key,
        query: topic,
        search_depth: "advanced",
        include_answers: true,
    };

    let response = client
        .post(TAVILY_SEARCH_URL)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;

    let body: SearchResponse = response.json().await?;
    Ok(join_snippets(body.results))
}

/// Join the content of up to the first [`MAX_RESULTS`] results with single
/// spaces, skipping results without content.
fn join_snippets(results: Vec<SearchResult>) -> String {
    results
        .into_iter()
        .take(MAX_RESULTS)
        .filter_map(|r| r.content)
        .collect::<Vec<_>>()
        .join(" ")
}
