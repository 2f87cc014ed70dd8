//! Data models for feed items and the processed digest.
//!
//! This module defines the data structures that flow through the pipeline:
//! - [`Source`]: a resolved feed endpoint
//! - [`RawItem`] / [`FeedData`]: unprocessed entries as decoded from a feed
//! - [`Article`]: a filtered, cleaned and classified entry
//! - [`Digest`]: the final article collection grouped by category
//!
//! Nothing here outlives a single run.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// A feed endpoint, either a static RSS/Atom URL or an expanded search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub url: String,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// One entry as decoded from a feed, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub title: String,
    /// Identity of the item across the whole run.
    pub link: String,
    /// Summary or description markup, if the feed carried one.
    pub summary: Option<String>,
    /// `None` when the feed omitted the date or it could not be parsed.
    pub published: Option<DateTime<Utc>>,
    /// The declared title of the feed this item came from.
    pub feed_title: Option<String>,
}

/// A decoded feed: its declared title plus entries in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedData {
    pub title: Option<String>,
    pub items: Vec<RawItem>,
}

/// A processed news item ready for rendering.
///
/// `link` is the sole identity key. `summary` may be empty, which means
/// "show no summary". `category` is one of the classifier's labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: String,
    pub category: String,
}

impl Article {
    /// Ordering key: undated articles sort as the earliest instant.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Publish date in local time, `YYYY-MM-DD`, when known.
    pub fn display_date(&self) -> Option<String> {
        self.published_at
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d").to_string())
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}

/// All articles of one category, in final order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub label: String,
    pub articles: Vec<Article>,
}

/// The output of one pipeline run, handed to the renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Digest {
    pub generated_at: DateTime<Utc>,
    /// Non-empty groups only, in category display order.
    pub groups: Vec<CategoryGroup>,
    /// Articles that came from feeds, excluding the fixed site entry.
    pub feed_article_count: usize,
}

impl Digest {
    /// True when no feed produced a relevant article.
    pub fn is_empty(&self) -> bool {
        self.feed_article_count == 0
    }

    pub fn article_count(&self) -> usize {
        self.groups.iter().map(|g| g.articles.len()).sum()
    }

    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.groups.iter().flat_map(|g| g.articles.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(link: &str, published_at: Option<DateTime<Utc>>) -> Article {
        Article {
            title: "Title".to_string(),
            link: link.to_string(),
            source: "Source".to_string(),
            published_at,
            summary: String::new(),
            category: "Industry News".to_string(),
        }
    }

    #[test]
    fn test_sort_key_missing_timestamp_is_earliest() {
        let dated = article("a", Some(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
        let undated = article("b", None);
        assert!(undated.sort_key() < dated.sort_key());
    }

    #[test]
    fn test_display_date_absent_when_undated() {
        assert_eq!(article("a", None).display_date(), None);
        let dated = article("a", Some(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()));
        assert!(dated.display_date().is_some());
    }

    #[test]
    fn test_digest_counts() {
        let digest = Digest {
            generated_at: Utc::now(),
            groups: vec![
                CategoryGroup {
                    label: "A".to_string(),
                    articles: vec![article("1", None), article("2", None)],
                },
                CategoryGroup {
                    label: "B".to_string(),
                    articles: vec![article("3", None)],
                },
            ],
            feed_article_count: 2,
        };
        assert_eq!(digest.article_count(), 3);
        assert!(!digest.is_empty());
        let links: Vec<&str> = digest.articles().map(|a| a.link.as_str()).collect();
        assert_eq!(links, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_article_serialization() {
        let json = serde_json::to_string(&article("https://example.org/a", None)).unwrap();
        assert!(json.contains("https://example.org/a"));
        assert!(json.contains("\"published_at\":null"));
    }
}
