//! JSON copy of the digest for machine consumers.
//!
//! The document is the serialized [`Digest`]: run time, feed article count,
//! and the category groups in display order.

use crate::models::Digest;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `digest` as pretty-printed JSON to `path`, replacing any previous file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_digest(digest: &Digest, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;
    ensure_parent_dir(path).await?;
    fs::write(path, json).await?;
    info!(articles = digest.article_count(), "Wrote JSON digest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, CategoryGroup};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_write_digest_overwrites() {
        let digest = Digest {
            generated_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap(),
            groups: vec![CategoryGroup {
                label: "Industry News".to_string(),
                articles: vec![Article {
                    title: "UWB outlook".to_string(),
                    link: "https://a.example/1".to_string(),
                    source: "A".to_string(),
                    published_at: None,
                    summary: String::new(),
                    category: "Industry News".to_string(),
                }],
            }],
            feed_article_count: 1,
        };

        let path = std::env::temp_dir()
            .join(format!("uwb_digest_json_test_{}", std::process::id()))
            .join("digest.json");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "stale contents").await.unwrap();

        write_digest(&digest, &path).await.unwrap();

        let written = fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["feed_article_count"], 1);
        assert_eq!(value["groups"][0]["label"], "Industry News");
        assert_eq!(value["groups"][0]["articles"][0]["link"], "https://a.example/1");

        let _ = fs::remove_dir_all(path.parent().unwrap()).await;
    }
}
