//! Markdown article output.

use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Render the Markdown document: an H1 of the slug, a blank line, then the
/// article body.
pub fn render(slug: &str, article: &str) -> String {
    format!("# {slug}\n\n{article}")
}

/// Write the article as `{slug}.md` under the output directory, overwriting
/// any previous run's file.
#[instrument(level = "info", skip_all, fields(slug = %slug))]
pub async fn write_article(dir: &str, slug: &str, article: &str) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}.md", dir.trim_end_matches('/'), slug);
    fs::write(&path, render(slug, article)).await?;
    info!(%path, "Wrote Markdown article");
    Ok(())
}
