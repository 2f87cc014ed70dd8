//! Fetch → filter → normalize → dedupe → classify → order.
//!
//! [`Pipeline::run`] walks the configured sources in order, one at a time.
//! Per-item rejections (stale, irrelevant) and per-source failures are
//! counted in [`RunStats`] and logged, never raised. After all sources, the
//! fixed site entry is appended, duplicates by link are dropped keeping the
//! first occurrence, and the survivors are stably sorted newest first and
//! grouped by category.

use crate::classify::Classifier;
use crate::config::{Config, FixedSite};
use crate::filters::{Recency, RecencyFilter, RelevanceFilter};
use crate::models::{Article, CategoryGroup, Digest, RawItem, Source};
use crate::scrapers::feed::{FetchFeed, FetchOutcome};
use crate::scrapers::fira;
use crate::text::{SummaryReducer, TextNormalizer, split_source_suffix};
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Counters for one run, logged at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub sources: usize,
    pub sources_skipped: usize,
    pub items_seen: usize,
    pub stale: usize,
    pub irrelevant: usize,
    pub kept: usize,
    pub duplicates: usize,
}

impl RunStats {
    fn absorb(&mut self, report: &SourceReport) {
        self.sources += 1;
        self.sources_skipped += usize::from(report.skipped);
        self.items_seen += report.seen;
        self.stale += report.stale;
        self.irrelevant += report.irrelevant;
        self.kept += report.articles.len();
    }
}

#[derive(Debug, Default)]
struct SourceReport {
    articles: Vec<Article>,
    skipped: bool,
    seen: usize,
    stale: usize,
    irrelevant: usize,
}

/// Why a raw item did not become an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Stale(Recency),
    Irrelevant,
}

pub struct Pipeline<F> {
    fetcher: F,
    sources: Vec<Source>,
    relevance: RelevanceFilter,
    recency: RecencyFilter,
    normalizer: TextNormalizer,
    reducer: SummaryReducer,
    classifier: Classifier,
    aggregators: Vec<String>,
    unknown_source_label: String,
    max_publisher_chars: usize,
    max_items_per_source: Option<usize>,
    fixed_site: FixedSite,
}

impl<F: FetchFeed> Pipeline<F> {
    pub fn new(config: &Config, sources: Vec<Source>, fetcher: F) -> Self {
        Self {
            fetcher,
            sources,
            relevance: RelevanceFilter::new(&config.keywords),
            recency: RecencyFilter::new(config.lookback_days),
            normalizer: TextNormalizer::new(&config.text),
            reducer: SummaryReducer::new(&config.text),
            classifier: Classifier::new(&config.categories, &config.default_category),
            aggregators: config.aggregators.clone(),
            unknown_source_label: config.unknown_source_label.clone(),
            max_publisher_chars: config.text.max_publisher_chars,
            max_items_per_source: config.max_items_per_source,
            fixed_site: config.fixed_site.clone(),
        }
    }

    /// Run every stage once. `now` anchors the recency window and dates the
    /// fixed site entry.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len()))]
    pub async fn run(&self, now: DateTime<Utc>) -> (Digest, RunStats) {
        let reports: Vec<SourceReport> = stream::iter(&self.sources)
            .then(|source| self.process_source(source, now))
            .collect()
            .await;

        let mut stats = RunStats::default();
        let mut articles = Vec::new();
        for report in reports {
            stats.absorb(&report);
            articles.extend(report.articles);
        }

        let feed_article_count = articles.iter().map(|a| &a.link).unique().count();
        articles.push(fira::site_article(&self.fixed_site, &self.reducer, now));

        let before = articles.len();
        let mut articles = dedupe(articles);
        stats.duplicates = before - articles.len();

        order(&mut articles);
        let groups = group_by_category(articles, &self.classifier.labels());

        for group in &groups {
            debug!(category = %group.label, count = group.articles.len(), "Category group");
        }
        info!(
            sources = stats.sources,
            skipped = stats.sources_skipped,
            seen = stats.items_seen,
            stale = stats.stale,
            irrelevant = stats.irrelevant,
            kept = stats.kept,
            duplicates = stats.duplicates,
            "Pipeline finished"
        );

        let digest = Digest {
            generated_at: now,
            groups,
            feed_article_count,
        };
        (digest, stats)
    }

    #[instrument(level = "debug", skip_all, fields(url = %source.url))]
    async fn process_source(&self, source: &Source, now: DateTime<Utc>) -> SourceReport {
        let feed = match self.fetcher.fetch(source).await {
            FetchOutcome::Fetched(feed) => feed,
            FetchOutcome::Skipped(reason) => {
                debug!(%reason, "Source contributed no items");
                return SourceReport {
                    skipped: true,
                    ..SourceReport::default()
                };
            }
        };

        let limit = self.max_items_per_source.unwrap_or(usize::MAX);
        let mut report = SourceReport::default();
        for item in feed.items.into_iter().take(limit) {
            report.seen += 1;
            let title = truncate_for_log(&item.title, 80);
            match self.build_article(item, now) {
                Ok(article) => report.articles.push(article),
                Err(Rejection::Stale(recency)) => {
                    debug!(%title, ?recency, "Dropped stale item");
                    report.stale += 1;
                }
                Err(Rejection::Irrelevant) => {
                    debug!(%title, "Dropped irrelevant item");
                    report.irrelevant += 1;
                }
            }
        }

        info!(
            seen = report.seen,
            kept = report.articles.len(),
            "Processed source"
        );
        report
    }

    fn build_article(&self, item: RawItem, now: DateTime<Utc>) -> Result<Article, Rejection> {
        let recency = self.recency.check(item.published, now);
        if !recency.is_accepted() {
            return Err(Rejection::Stale(recency));
        }
        if !self
            .relevance
            .is_relevant(&item.title, item.summary.as_deref())
        {
            return Err(Rejection::Irrelevant);
        }

        let split = split_source_suffix(&item.title, self.max_publisher_chars);
        let source = self.source_label(split.publisher.as_deref(), item.feed_title.as_deref());
        let strip_label = (source != self.unknown_source_label).then_some(source.as_str());

        let cleaned = self
            .normalizer
            .normalize(item.summary.as_deref().unwrap_or(""), strip_label);
        if cleaned.fell_back {
            debug!(link = %item.link, "Summary cleanup fell back to raw prefix");
        }
        let summary = self.reducer.reduce(&split.title, &cleaned.text);
        let category = self.classifier.classify(&split.title, &summary).to_string();

        Ok(Article {
            title: split.title,
            link: item.link,
            source,
            published_at: item.published,
            summary,
            category,
        })
    }

    /// Detected publisher, else the aggregator's generic name, else the
    /// feed's declared title.
    fn source_label(&self, publisher: Option<&str>, feed_title: Option<&str>) -> String {
        if let Some(publisher) = publisher {
            return publisher.to_string();
        }
        let Some(feed_title) = feed_title else {
            return self.unknown_source_label.clone();
        };
        let lowered = feed_title.to_lowercase();
        self.aggregators
            .iter()
            .find(|name| lowered.contains(&name.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| feed_title.to_string())
    }
}

/// Keep the first article per link, in encounter order.
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .unique_by(|a| a.link.clone())
        .collect()
}

/// Stable sort, newest first; undated articles sink to the bottom.
pub fn order(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

/// Group in `labels` order, dropping empty groups. Articles keep their
/// relative order within a group.
pub fn group_by_category(articles: Vec<Article>, labels: &[&str]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = labels
        .iter()
        .map(|label| CategoryGroup {
            label: label.to_string(),
            articles: Vec::new(),
        })
        .collect();

    for article in articles {
        match groups.iter_mut().find(|g| g.label == article.category) {
            Some(group) => group.articles.push(article),
            None => groups.push(CategoryGroup {
                label: article.category.clone(),
                articles: vec![article],
            }),
        }
    }

    groups.retain(|g| !g.articles.is_empty());
    groups
}
