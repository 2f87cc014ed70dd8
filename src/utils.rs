//! Utility functions for string manipulation and output paths.
//!
//! - String truncation for logging and for display caps
//! - Slugification for in-page anchors
//! - Output location validation

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Cap `s` at `max` characters, marker included.
///
/// Strings that already fit are returned unchanged. Otherwise the text is
/// cut at a character boundary, trailing whitespace is dropped, and `marker`
/// is appended.
pub fn truncate_with_marker(s: &str, max: usize, marker: &str) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(marker.chars().count());
    let head: String = s.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), marker)
}

/// Convert a label to a URL-fragment-friendly slug.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Chips & Vendors"), "chips--vendors");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// Ensure the directory that will hold `path` exists.
///
/// Paths without a parent component (a bare file name) resolve to the
/// working directory and need nothing created.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            info!(dir = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("超宽带超宽带", 3);
        assert!(result.starts_with("超宽带…"));
    }

    #[test]
    fn test_truncate_with_marker_fits() {
        assert_eq!(truncate_with_marker("short", 10, "..."), "short");
        assert_eq!(truncate_with_marker("exactly10!", 10, "..."), "exactly10!");
    }

    #[test]
    fn test_truncate_with_marker_cuts() {
        let out = truncate_with_marker("abcdefghijkl", 10, "...");
        assert_eq!(out, "abcdefg...");
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn test_truncate_with_marker_trims_before_marker() {
        assert_eq!(truncate_with_marker("abc   defghijk", 8, "..."), "abc...");
    }

    #[test]
    fn test_truncate_with_marker_counts_chars_not_bytes() {
        let out = truncate_with_marker("超宽带技术正在快速发展", 6, "…");
        assert_eq!(out, "超宽带技术…");
    }

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Industry News"), "industry-news");
        assert_eq!(slugify_title("Chips & Vendors"), "chips--vendors");
        assert_eq!(slugify_title("Automotive & Digital Key"), "automotive--digital-key");
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_bare_file_name() {
        assert!(ensure_parent_dir(Path::new("index.html")).await.is_ok());
    }
}
