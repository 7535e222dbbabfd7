//! Command-line interface definitions for News Forge.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials can be provided via command-line flags or environment
//! variables; the model API key is required, so a missing credential is a
//! startup failure with a one-line error rather than a mid-run surprise.

use clap::Parser;

/// Command-line arguments for the News Forge application.
///
/// # Examples
///
/// ```sh
/// # Prompt for the topic interactively
/// news_forge
///
/// # Non-interactive, with a custom output directory
/// news_forge --topic "Quantum Computing" --output-dir ./data_storage
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic to research; prompts on stdin when omitted
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Output directory for the Markdown and JSON artifacts
    #[arg(short, long, default_value = "data_storage")]
    pub output_dir: String,

    /// API key for the OpenAI-compatible model endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible model endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model name to request from the endpoint
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Tavily API key for the web search adapter (adapter yields an empty
    /// snippet when unset)
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    /// Google Fact Check Tools API key (adapter yields an explanatory
    /// fallback when unset)
    #[arg(long, env = "GOOGLE_FACT_CHECK_API_KEY", hide_env_values = true)]
    pub fact_check_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_forge",
            "--topic",
            "Quantum Computing",
            "--output-dir",
            "./out",
            "--api-key",
            "sk-test",
        ]);

        assert_eq!(cli.topic.as_deref(), Some("Quantum Computing"));
        assert_eq!(cli.output_dir, "./out");
        assert_eq!(cli.api_key, "sk-test");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_forge", "--api-key", "sk-test"]);

        assert_eq!(cli.topic, None);
        assert_eq!(cli.output_dir, "data_storage");
        assert_eq!(cli.base_url, "https://api.openai.com/v1");
        assert_eq!(cli.model, "gpt-4o-mini");
        assert_eq!(cli.tavily_api_key, None);
        assert_eq!(cli.fact_check_api_key, None);
    }
}
