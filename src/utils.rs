//! Utility functions for string manipulation and file system checks.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Derive the filesystem-safe slug used to name output files.
///
/// Mirrors the output naming convention exactly: spaces become underscores
/// and everything else is kept as-is, so `Quantum Computing` maps to
/// `Quantum_Computing.md` / `Quantum_Computing.json`.
pub fn topic_slug(topic: &str) -> String {
    topic.replace(' ', "_")
}

/// Keep at most `max` characters of a string, cutting on a char boundary.
///
/// Used to cap the raw arXiv response before it enters the research summary.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut backs up to the nearest char
/// boundary so multi-byte text (provider snippets are arbitrary UTF-8)
/// never panics the log line.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_slug() {
        assert_eq!(topic_slug("Quantum Computing"), "Quantum_Computing");
        assert_eq!(topic_slug("AI"), "AI");
        assert_eq!(topic_slug("a b c"), "a_b_c");
        assert_eq!(topic_slug(""), "");
    }

    #[test]
    fn test_truncate_chars_short_string() {
        assert_eq!(truncate_chars("hello", 1000), "hello");
    }

    #[test]
    fn test_truncate_chars_cuts_at_limit() {
        let s = "a".repeat(1500);
        assert_eq!(truncate_chars(&s, 1000).chars().count(), 1000);
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        // Multi-byte chars must not be split mid-codepoint.
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(&s, 4), "éééé");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_backs_up_to_char_boundary() {
        // 119 ASCII bytes followed by two-byte chars puts the 120th byte
        // inside a codepoint; the cut must land on the boundary before it.
        let s = format!("{}{}", "a".repeat(119), "é".repeat(10));
        let result = truncate_for_log(&s, 120);
        assert!(result.starts_with(&"a".repeat(119)));
        assert!(result.contains("…(+20 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte_only() {
        let s = "é".repeat(100); // 200 bytes
        let result = truncate_for_log(&s, 51);
        assert_eq!(result, format!("{}…(+{} bytes)", "é".repeat(25), 150));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = format!("{}/a/b", dir.path().display());
        ensure_writable_dir(&nested).await.unwrap();
        assert!(std::path::Path::new(&nested).is_dir());
    }
}
