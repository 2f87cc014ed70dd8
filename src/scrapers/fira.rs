//! FiRa Consortium press-release page.
//!
//! The page has no feed and its markup is not parsed. The digest carries a
//! single pointer entry instead, dated at run time so it sits at the top of
//! its category.

use crate::config::FixedSite;
use crate::models::Article;
use crate::text::SummaryReducer;
use chrono::{DateTime, Utc};

/// The fixed entry for the externally maintained site. Its summary is held
/// to the same display cap as feed summaries.
pub fn site_article(site: &FixedSite, reducer: &SummaryReducer, now: DateTime<Utc>) -> Article {
    Article {
        title: site.title.clone(),
        link: site.link.clone(),
        source: site.source.clone(),
        published_at: Some(now),
        summary: reducer.cap(&site.summary),
        category: site.category.clone(),
    }
}
