//! Google Fact Check Tools adapter.
//!
//! Looks the topic up as a claim against the claims:search endpoint and
//! returns the first matched claim's text. Access denial (403, typically a
//! bad or unauthorized key) and other failures each map to a distinct
//! explanatory string; a clean response with no matches yields the
//! "No fact-check available." sentinel.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const FACT_CHECK_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";

/// Sentinel returned when the service has no claim matching the topic.
pub const NO_FACT_CHECK: &str = "No fact-check available.";

const ACCESS_DENIED: &str =
    "Fact-check API access denied. Check your API key and permissions.";

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    #[serde(default)]
    claims: Vec<Claim>,
}

#[derive(Debug, Deserialize)]
struct Claim {
    text: Option<String>,
}

/// Look a claim up against the fact-check service.
///
/// Returns the first matched claim's text, the [`NO_FACT_CHECK`] sentinel
/// when nothing matches, or an explanatory string on denial/failure.
#[instrument(level = "info", skip_all, fields(claim = %claim))]
pub async fn lookup(client: &Client, api_key: Option<&str>, claim: &str) -> String {
    let Some(api_key) = api_key else {
        warn!("No fact-check API key configured");
        return "Fact-check unavailable: no API key configured.".to_string();
    };

    let response = match client
        .get(FACT_CHECK_URL)
        .query(&[("query", claim), ("key", api_key)])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Fact-check request failed");
            return format!("Fact-check API error: {e}");
        }
    };

    match response.status() {
        StatusCode::FORBIDDEN => {
            warn!("Fact-check API access denied");
            ACCESS_DENIED.to_string()
        }
        status if !status.is_success() => {
            warn!(%status, "Fact-check API returned an error status");
            format!("Fact-check API error: HTTP {status}")
        }
        _ => match response.json::<ClaimsResponse>().await {
            Ok(body) => first_claim_text(body),
            Err(e) => {
                warn!(error = %e, "Fact-check body did not parse");
                format!("Fact-check API error: {e}")
            }
        },
    }
}

fn first_claim_text(body: ClaimsResponse) -> String {
    match body.claims.into_iter().next().and_then(|c| c.text) {
        Some(text) => {
            debug!(bytes = text.len(), "Fact-check claim matched");
            text
        }
        None => NO_FACT_CHECK.to_string(),
    }
}
