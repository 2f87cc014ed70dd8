//! Static HTML rendering.
//!
//! One page: header with the run time, an empty-state note when no feed
//! produced anything, then a section per non-empty category in display
//! order. All text and attribute values are escaped.

use crate::config::PageConfig;
use crate::models::{Article, Digest};
use crate::utils::{ensure_parent_dir, slugify_title};
use chrono::Local;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::error::Error;
use std::fmt::Write;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; background-color: #f4f4f9; }
    h1 { color: #333; border-bottom: 2px solid #007bff; padding-bottom: 10px; }
    h2 { color: #444; margin-top: 32px; }
    .date { color: #666; font-size: 0.9em; margin-bottom: 30px; }
    .empty { color: #888; font-style: italic; }
    .card { background: white; padding: 20px; margin-bottom: 15px; border-radius: 8px; box-shadow: 0 2px 5px rgba(0,0,0,0.05); }
    .tag { background: #e3f2fd; color: #007bff; padding: 2px 8px; border-radius: 4px; font-size: 0.8em; font-weight: bold; }
    .card a { text-decoration: none; color: #2c3e50; font-size: 1.1em; font-weight: 600; }
    .card a:hover { color: #007bff; }
    .meta { color: #888; font-size: 0.9em; margin-top: 5px; display: block; }
    .summary { color: #444; margin: 8px 0 0; line-height: 1.5; }
"#;

/// Render the complete document.
pub fn render(digest: &Digest, page: &PageConfig) -> String {
    let mut html = String::with_capacity(4096 + digest.article_count() * 512);
    let generated = digest
        .generated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M");

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>{}</h1>\n<p class=\"date\">Updated: {}</p>\n",
        encode_text(&page.title),
        STYLE,
        encode_text(&page.heading),
        generated,
    );

    if digest.is_empty() {
        let _ = writeln!(html, "<p class=\"empty\">{}</p>", encode_text(&page.empty_message));
    }

    for group in &digest.groups {
        let _ = writeln!(
            html,
            "<section id=\"{}\">\n<h2>{}</h2>",
            encode_double_quoted_attribute(&slugify_title(&group.label)),
            encode_text(&group.label),
        );
        for article in &group.articles {
            render_card(&mut html, article);
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_card(html: &mut String, article: &Article) {
    let title = if article.title.is_empty() {
        article.link.as_str()
    } else {
        article.title.as_str()
    };
    let meta = match article.display_date() {
        Some(date) => format!("{} · {}", article.source, date),
        None => article.source.clone(),
    };

    let _ = write!(
        html,
        "<div class=\"card\">\n<span class=\"tag\">{}</span>\n<div style=\"margin-top: 8px;\">\n\
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n\
         <span class=\"meta\">Source: {}</span>\n",
        encode_text(&article.category),
        encode_double_quoted_attribute(&article.link),
        encode_text(title),
        encode_text(&meta),
    );
    if article.has_summary() {
        let _ = writeln!(html, "<p class=\"summary\">{}</p>", encode_text(&article.summary));
    }
    html.push_str("</div>\n</div>\n");
}

/// Render and write the page to `path`, replacing any previous file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write(digest: &Digest, page: &PageConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let html = render(digest, page);
    ensure_parent_dir(path).await?;
    fs::write(path, html.as_bytes()).await?;
    info!(bytes = html.len(), articles = digest.article_count(), "Wrote HTML digest");
    Ok(())
}
