//! JSON artifact output.
//!
//! Serializes the run's [`ArticleDocument`] so downstream consumers can pick
//! up the research summary and article without parsing Markdown.

use crate::models::ArticleDocument;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write the document as `{slug}.json` under the output directory,
/// overwriting any previous run's file.
#[instrument(level = "info", skip_all, fields(slug = %slug))]
pub async fn write_document(
    dir: &str,
    slug: &str,
    document: &ArticleDocument,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(document)?;
    let path = format!("{}/{}.json", dir.trim_end_matches('/'), slug);
    fs::write(&path, json).await?;
    info!(%path, "Wrote JSON document");
    Ok(())
}
