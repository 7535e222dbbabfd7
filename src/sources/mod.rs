//! Source adapters for querying external information providers.
//!
//! Each submodule wraps one provider behind the same contract: given a
//! topic, return a best-effort text snippet or a documented fallback string.
//! Errors never cross the adapter boundary; a provider outage degrades the
//! research summary instead of aborting the run.
//!
//! # Providers
//!
//! | Provider | Module | Fallback on failure |
//! |----------|--------|---------------------|
//! | Tavily web search | [`websearch`] | empty string |
//! | Wikipedia REST summary | [`wikipedia`] | explanatory string |
//! | arXiv export API | [`arxiv`] | empty string |
//! | Google Fact Check Tools | [`factcheck`] | explanatory string |
//!
//! Each adapter performs at most one outbound HTTP call per topic, and the
//! research step invokes them strictly in sequence.

pub mod arxiv;
pub mod factcheck;
pub mod websearch;
pub mod wikipedia;

/// Handle bundling the shared HTTP client and per-provider credentials.
///
/// Constructed once at startup and borrowed by the research step for the
/// duration of the run.
#[derive(Debug)]
pub struct Sources {
    client: reqwest::Client,
    tavily_api_key: Option<String>,
    fact_check_api_key: Option<String>,
}

impl Sources {
    pub fn new(tavily_api_key: Option<String>, fact_check_api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tavily_api_key,
            fact_check_api_key,
        }
    }

    /// Query the web search provider. Empty string when no key is configured
    /// or the provider fails.
    pub async fn search_web(&self, topic: &str) -> String {
        websearch::search(&self.client, self.tavily_api_key.as_deref(), topic).await
    }

    /// Fetch the encyclopedia summary for the topic.
    pub async fn search_wikipedia(&self, topic: &str) -> String {
        wikipedia::summary(&self.client, topic).await
    }

    /// Query the preprint archive for the topic.
    pub async fn search_arxiv(&self, topic: &str) -> String {
        arxiv::search(&self.client, topic).await
    }

    /// Look the topic up as a claim against the fact-check service.
    pub async fn fact_check(&self, claim: &str) -> String {
        factcheck::lookup(&self.client, self.fact_check_api_key.as_deref(), claim).await
    }
}
