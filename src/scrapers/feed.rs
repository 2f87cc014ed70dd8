//! RSS/Atom feed fetching and decoding.
//!
//! One GET per source with a browser user agent, an `Accept` header that
//! prefers feed formats, and a bounded timeout. No retries: any transport
//! error, non-2xx status or undecodable body turns into
//! [`FetchOutcome::Skipped`] with the reason attached.

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::{FeedData, RawItem, Source};
use feed_rs::model::Entry;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Result of fetching one source. Never an `Err`: a failed source is
/// simply skipped for this run.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(FeedData),
    Skipped(FetchError),
}

/// Anything that can turn a [`Source`] into feed data.
pub trait FetchFeed {
    async fn fetch(&self, source: &Source) -> FetchOutcome;
}

/// HTTP implementation of [`FetchFeed`].
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> Result<FeedData, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Downloaded feed body");
        parse_feed(&body)
    }
}

impl FetchFeed for FeedFetcher {
    #[instrument(level = "info", skip_all, fields(url = %source.url))]
    async fn fetch(&self, source: &Source) -> FetchOutcome {
        let t0 = Instant::now();
        match self.try_fetch(&source.url).await {
            Ok(feed) => {
                info!(
                    items = feed.items.len(),
                    feed_title = feed.title.as_deref().unwrap_or(""),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched feed"
                );
                FetchOutcome::Fetched(feed)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Feed unavailable; skipping source"
                );
                FetchOutcome::Skipped(e)
            }
        }
    }
}

/// Decode an RSS or Atom document into [`FeedData`].
///
/// Entries without a link are dropped since the link is the item identity.
/// Missing or unparseable dates become `None`; `updated` stands in when
/// `published` is absent.
pub fn parse_feed(body: &[u8]) -> Result<FeedData, FetchError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let title = feed
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty());

    let items = feed
        .entries
        .into_iter()
        .filter_map(|entry| raw_item(entry, title.as_deref()))
        .collect();

    Ok(FeedData { title, items })
}

fn raw_item(entry: Entry, feed_title: Option<&str>) -> Option<RawItem> {
    let link = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty());

    let Some(link) = link else {
        debug!(id = %entry.id, "Entry has no link; dropping");
        return None;
    };

    let summary = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body));

    Some(RawItem {
        title: entry.title.map(|t| t.content).unwrap_or_default(),
        link,
        summary,
        published: entry.published.or(entry.updated),
        feed_title: feed_title.map(str::to_string),
    })
}
