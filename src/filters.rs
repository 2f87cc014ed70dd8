//! Relevance and recency filters applied to every raw item.
//!
//! Both filters are permissive on purpose. Keyword matching is plain
//! case-insensitive substring containment with no word boundaries, so short
//! abbreviations such as `UWB` also match inside unrelated words. Items with
//! no usable timestamp are treated as recent.

use chrono::{DateTime, Utc};

/// Case-insensitive substring matcher over a fixed keyword list.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new(keywords: &[String]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// True iff some keyword occurs in `title + " " + summary`.
    pub fn is_relevant(&self, title: &str, summary: Option<&str>) -> bool {
        let text = format!("{} {}", title, summary.unwrap_or("")).to_lowercase();
        self.matched_keyword_in(&text).is_some()
    }

    /// First keyword contained in already lower-cased `text`.
    pub fn matched_keyword_in(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// Outcome of checking an item's timestamp against the lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    Recent { age_days: i64 },
    /// No timestamp; accepted by default.
    Undated,
    Stale { age_days: i64 },
}

impl Recency {
    pub fn is_accepted(self) -> bool {
        !matches!(self, Recency::Stale { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    lookback_days: i64,
}

impl RecencyFilter {
    pub fn new(lookback_days: i64) -> Self {
        Self { lookback_days }
    }

    /// Age in whole days relative to `now`; within the window is inclusive.
    pub fn check(&self, published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Recency {
        let Some(published) = published else {
            return Recency::Undated;
        };
        let age_days = now.signed_duration_since(published).num_days();
        if age_days <= self.lookback_days {
            Recency::Recent { age_days }
        } else {
            Recency::Stale { age_days }
        }
    }
}
