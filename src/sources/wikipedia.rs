//! Wikipedia REST summary adapter.
//!
//! Normalizes the topic into a page title (spaces become underscores, then
//! percent-encoded) and fetches the page summary from the REST v1 API. A
//! missing page and other HTTP failures each map to a distinct explanatory
//! string rather than an error, so the research summary always has a
//! Wikipedia segment of some kind.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const WIKIPEDIA_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

#[derive(Debug, Deserialize)]
struct PageSummary {
    extract: Option<String>,
}

/// Normalize a topic into the encoded page title the summary endpoint expects.
fn page_title(topic: &str) -> String {
    urlencoding::encode(&topic.replace(' ', "_")).into_owned()
}

/// Fetch the encyclopedia summary for a topic.
///
/// Returns the page extract on success, or one of the documented fallbacks:
/// a "no page found" string for 404, an error-describing string for other
/// failures, and "No Wikipedia data found." when the page has no extract.
#[instrument(level = "info", skip_all, fields(topic = %topic))]
pub async fn summary(client: &Client, topic: &str) -> String {
    let url = format!("{}/{}", WIKIPEDIA_SUMMARY_URL, page_title(topic));

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Wikipedia request failed");
            return format!("Wikipedia API error: {e}");
        }
    };

    match response.status() {
        StatusCode::NOT_FOUND => {
            debug!("No Wikipedia page for topic");
            format!("No Wikipedia page found for '{topic}'. Try refining your search.")
        }
        status if !status.is_success() => {
            warn!(%status, "Wikipedia returned an error status");
            format!("Wikipedia API error: HTTP {status}")
        }
        _ => match response.json::<PageSummary>().await {
            Ok(page) => match page.extract.filter(|e| !e.is_empty()) {
                Some(extract) => {
                    debug!(bytes = extract.len(), "Fetched Wikipedia extract");
                    extract
                }
                None => "No Wikipedia data found.".to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Wikipedia summary body did not parse");
                format!("Wikipedia API error: {e}")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title_replaces_spaces() {
        assert_eq!(page_title("Quantum Computing"), "Quantum_Computing");
    }

    #[test]
    fn test_page_title_percent_encodes() {
        assert_eq!(page_title("C++ (language)"), "C%2B%2B_%28language%29");
    }

    #[test]
    fn test_page_title_plain_word_unchanged() {
        assert_eq!(page_title("Rust"), "Rust");
    }

    #[test]
    fn test_page_summary_extract_parses() {
        let page: PageSummary =
            serde_json::from_str(r#"{"title":"Rust","extract":"A language."}"#).unwrap();
        assert_eq!(page.extract.as_deref(), Some("A language."));
    }

    #[test]
    fn test_page_summary_tolerates_missing_extract() {
        let page: PageSummary = serde_json::from_str(r#"{"title":"Rust"}"#).unwrap();
        assert_eq!(page.extract, None);
    }
}
