//! Run configuration.
//!
//! Every tunable the pipeline uses lives in [`Config`] and is handed to each
//! component at construction. [`Config::default`] carries the built-in UWB
//! digest setup; a YAML file may override any subset of it.
//!
//! ```yaml
//! lookback_days: 14
//! keywords: ["UWB", "FiRa"]
//! sources:
//!   - kind: feed
//!     url: https://www.iotforall.com/feed
//!   - kind: search
//!     query: FiRa Consortium
//! ```

use crate::classify::Classifier;
use crate::error::ConfigError;
use crate::models::Source;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Placeholder substituted with the URL-encoded query in `search_template`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    /// Matched as case-insensitive substrings of title + summary.
    pub keywords: Vec<String>,
    pub sources: Vec<SourceEntry>,
    pub search_template: String,
    /// Inclusive recency window in whole days.
    pub lookback_days: i64,
    pub max_items_per_source: Option<usize>,
    pub fetch: FetchConfig,
    pub text: TextConfig,
    /// Checked in order; first match wins.
    pub categories: Vec<CategoryRule>,
    pub default_category: String,
    /// Feed titles containing one of these are meta-aggregators.
    pub aggregators: Vec<String>,
    pub unknown_source_label: String,
    pub fixed_site: FixedSite,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceEntry {
    Feed { url: String },
    Search { query: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    pub empty_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    pub accept: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Removed verbatim wherever they occur in a summary.
    pub boilerplate: Vec<String>,
    pub min_summary_chars: usize,
    /// Max length difference between title and summary cores for the
    /// summary to count as a restatement of the title.
    pub redundancy_length_slack: usize,
    pub max_summary_chars: usize,
    pub fallback_summary_chars: usize,
    pub ellipsis: String,
    pub max_publisher_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

/// The externally maintained page represented by one hardcoded entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FixedSite {
    pub title: String,
    pub link: String,
    pub source: String,
    pub summary: String,
    pub category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            keywords: strings(&[
                "UWB",
                "Ultra-Wideband",
                "Ultra Wideband",
                "FiRa",
                "802.15.4z",
                "High precision location",
                "超宽带",
                "超寬頻",
            ]),
            sources: vec![
                SourceEntry::Feed {
                    url: "https://techcrunch.com/tag/ultra-wideband/feed/".to_string(),
                },
                SourceEntry::Feed {
                    url: "https://www.iotforall.com/feed".to_string(),
                },
                SourceEntry::Feed {
                    url: "https://www.iot-now.com/feed/".to_string(),
                },
                SourceEntry::Feed {
                    url: "https://www.eetimes.com/designline/internet-of-things-designline/feed/"
                        .to_string(),
                },
                SourceEntry::Search {
                    query: "\"UWB\" ultra-wideband".to_string(),
                },
                SourceEntry::Search {
                    query: "FiRa Consortium".to_string(),
                },
                SourceEntry::Search {
                    query: "超宽带 UWB".to_string(),
                },
            ],
            search_template: "https://news.google.com/rss/search?q={query}&hl=en-US&gl=US&ceid=US:en"
                .to_string(),
            lookback_days: 30,
            max_items_per_source: None,
            fetch: FetchConfig::default(),
            text: TextConfig::default(),
            categories: vec![
                CategoryRule {
                    label: "Standards & Alliances".to_string(),
                    keywords: strings(&[
                        "fira",
                        "consortium",
                        "ieee",
                        "802.15",
                        "standard",
                        "alliance",
                        "car connectivity",
                        "certification",
                        "specification",
                    ]),
                },
                CategoryRule {
                    label: "Chips & Vendors".to_string(),
                    keywords: strings(&[
                        "nxp",
                        "qorvo",
                        "infineon",
                        "stmicro",
                        "apple",
                        "samsung",
                        "u1 chip",
                        "u2 chip",
                        "chipset",
                        "chip",
                        "system-on-chip",
                        "module",
                        "semiconductor",
                    ]),
                },
                CategoryRule {
                    label: "Automotive & Digital Key".to_string(),
                    keywords: strings(&[
                        "digital key",
                        "automotive",
                        "vehicle",
                        "car access",
                        "keyless",
                    ]),
                },
                CategoryRule {
                    label: "Positioning & Tracking".to_string(),
                    keywords: strings(&[
                        "rtls",
                        "indoor positioning",
                        "localization",
                        "tracking",
                        "asset tag",
                        "anchor",
                        "positioning",
                    ]),
                },
            ],
            default_category: "Industry News".to_string(),
            aggregators: strings(&["Google News", "Bing News"]),
            unknown_source_label: "Unknown Source".to_string(),
            fixed_site: FixedSite::default(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "UWB Daily Intelligence".to_string(),
            heading: "UWB & IoT Daily Intelligence".to_string(),
            empty_message: "No relevant news today.".to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
                .to_string(),
            accept: "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.5"
                .to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            boilerplate: strings(&[
                "View Full Coverage on Google News",
                "Continue reading",
                "Read more",
                "[…]",
                "[...]",
            ]),
            min_summary_chars: 20,
            redundancy_length_slack: 20,
            max_summary_chars: 200,
            fallback_summary_chars: 200,
            ellipsis: "...".to_string(),
            max_publisher_chars: 60,
        }
    }
}

impl Default for FixedSite {
    fn default() -> Self {
        Self {
            title: "FiRa Consortium press releases (check the site for updates)".to_string(),
            link: "https://www.firaconsortium.org/about/news-events/press-releases".to_string(),
            source: "FiRa Consortium".to_string(),
            summary: "Standards, certification and member announcements from the FiRa \
                      Consortium. This entry links to the press-release page, which is \
                      not parsed for individual stories."
                .to_string(),
            category: "Standards & Alliances".to_string(),
        }
    }
}

impl Config {
    /// Load the built-in configuration, overridden by a YAML file if given.
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&raw)?;
                info!(path = %path.display(), "Loaded configuration file");
                config
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid("keyword list is empty".to_string()));
        }
        if self.lookback_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be non-negative, got {}",
                self.lookback_days
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be positive".to_string()));
        }
        if self.text.max_summary_chars <= self.text.ellipsis.chars().count() {
            return Err(ConfigError::Invalid(
                "text.max_summary_chars must exceed the ellipsis length".to_string(),
            ));
        }
        if self.default_category.trim().is_empty()
            || self.categories.iter().any(|c| c.label.trim().is_empty())
        {
            return Err(ConfigError::Invalid("category labels must be non-empty".to_string()));
        }
        let classifier = Classifier::new(&self.categories, &self.default_category);
        if !classifier.labels().contains(&self.fixed_site.category.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "fixed_site.category {:?} is not a configured category",
                self.fixed_site.category
            )));
        }
        let has_search = self
            .sources
            .iter()
            .any(|s| matches!(s, SourceEntry::Search { .. }));
        if has_search && !self.search_template.contains(QUERY_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "search_template must contain {QUERY_PLACEHOLDER}"
            )));
        }
        Ok(())
    }

    /// Expand the declared sources into feed URLs, preserving order.
    pub fn resolve_sources(&self) -> Result<Vec<Source>, ConfigError> {
        self.sources
            .iter()
            .map(|entry| {
                let url = match entry {
                    SourceEntry::Feed { url } => url.clone(),
                    SourceEntry::Search { query } => search_url(&self.search_template, query),
                };
                Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                    url: url.clone(),
                    source,
                })?;
                Ok(Source::new(url))
            })
            .collect()
    }
}

/// Build a search-feed URL by URL-encoding `query` into `template`.
pub fn search_url(template: &str, query: &str) -> String {
    template.replace(QUERY_PLACEHOLDER, &urlencoding::encode(query))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
