//! Title and summary cleanup.
//!
//! - [`split_source_suffix`]: best-effort `"Headline - Publisher"` split
//! - [`TextNormalizer`]: markup stripping, whitespace folding, boilerplate and
//!   source-name removal
//! - [`SummaryReducer`]: drops summaries that only restate the title and caps
//!   the display length

use crate::config::TextConfig;
use crate::utils::truncate_with_marker;
use regex::RegexBuilder;
use scraper::{Html, Node};
use tracing::warn;

const TITLE_SEPARATOR: &str = " - ";

/// Labels shorter than this are too ambiguous to strip from body text.
const MIN_LABEL_CHARS: usize = 3;

/// A title with any trailing publisher attribution split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSplit {
    pub title: String,
    pub publisher: Option<String>,
}

/// Split a trailing `" - Publisher"` suffix off `title`.
///
/// Only the last separator counts, so `"A - B - Wire"` yields `"A - B"` and
/// `"Wire"`. The split is rejected, leaving the title whole, when there is no
/// separator, when either side is empty, or when the suffix is longer than
/// `max_publisher_chars` (long suffixes are usually part of the headline).
pub fn split_source_suffix(title: &str, max_publisher_chars: usize) -> TitleSplit {
    let trimmed = title.trim();
    if let Some((head, tail)) = trimmed.rsplit_once(TITLE_SEPARATOR) {
        let (head, tail) = (head.trim(), tail.trim());
        if !head.is_empty() && !tail.is_empty() && tail.chars().count() <= max_publisher_chars {
            return TitleSplit {
                title: head.to_string(),
                publisher: Some(tail.to_string()),
            };
        }
    }
    TitleSplit {
        title: trimmed.to_string(),
        publisher: None,
    }
}

/// Normalizer output. `fell_back` is set when cleaning failed and `text` is
/// a raw prefix instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub fell_back: bool,
}

#[derive(Debug, Clone)]
pub struct TextNormalizer {
    boilerplate: Vec<String>,
    fallback_chars: usize,
}

impl TextNormalizer {
    pub fn new(config: &TextConfig) -> Self {
        Self {
            boilerplate: config
                .boilerplate
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            fallback_chars: config.fallback_summary_chars,
        }
    }

    /// Clean raw summary markup. Never fails; see [`Normalized::fell_back`].
    pub fn normalize(&self, raw: &str, source: Option<&str>) -> Normalized {
        self.settle(raw, self.try_normalize(raw, source))
    }

    fn settle(&self, raw: &str, cleaned: Result<String, regex::Error>) -> Normalized {
        match cleaned {
            Ok(text) => Normalized {
                text,
                fell_back: false,
            },
            Err(e) => {
                warn!(error = %e, "Summary cleanup failed; using raw prefix");
                Normalized {
                    text: raw.trim().chars().take(self.fallback_chars).collect(),
                    fell_back: true,
                }
            }
        }
    }

    fn try_normalize(&self, raw: &str, source: Option<&str>) -> Result<String, regex::Error> {
        let mut text = collapse_whitespace(&strip_markup(raw));

        if self.boilerplate.iter().any(|p| text.contains(p.as_str())) {
            for phrase in &self.boilerplate {
                text = text.replace(phrase.as_str(), " ");
            }
            text = collapse_whitespace(&text);
        }

        if let Some(label) = source
            .map(str::trim)
            .filter(|l| l.chars().count() >= MIN_LABEL_CHARS)
        {
            let pattern = RegexBuilder::new(&regex::escape(label))
                .case_insensitive(true)
                .build()?;
            if pattern.is_match(&text) {
                text = collapse_whitespace(&pattern.replace_all(&text, " "));
                text = text.trim_end_matches(is_dangling).to_string();
            }
        }

        Ok(text)
    }
}

/// Elements whose boundaries separate words. Inline tags do not.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Elements whose text is never shown.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

enum Step<N> {
    Enter(N),
    Leave,
}

/// Drop markup, keeping inline text contiguous and separating block-level
/// text with a space. Entities are decoded by the parser.
pub fn strip_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::with_capacity(raw.len());
    let mut stack = vec![Step::Enter(*fragment.root_element())];

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Leave => {
                out.push(' ');
                continue;
            }
            Step::Enter(node) => node,
        };
        match node.value() {
            Node::Text(text) => {
                out.push_str(text);
                continue;
            }
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => continue,
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => {
                out.push(' ');
                stack.push(Step::Leave);
            }
            _ => {}
        }
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(Step::Enter));
    }
    out
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Separator and punctuation characters left behind after removing a name.
fn is_dangling(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '–' | '—' | '|' | ':' | ',' | ';' | '·' | '•' | '/')
}

/// Alphanumeric-only, lower-cased form used for redundancy checks.
fn core(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decides whether a cleaned summary is worth showing, and caps its length.
#[derive(Debug, Clone)]
pub struct SummaryReducer {
    min_chars: usize,
    length_slack: usize,
    max_chars: usize,
    ellipsis: String,
}

impl SummaryReducer {
    pub fn new(config: &TextConfig) -> Self {
        Self {
            min_chars: config.min_summary_chars,
            length_slack: config.redundancy_length_slack,
            max_chars: config.max_summary_chars,
            ellipsis: config.ellipsis.clone(),
        }
    }

    /// Final display summary for `title`; empty means "no summary".
    pub fn reduce(&self, title: &str, summary: &str) -> String {
        let summary = summary.trim();
        if summary.chars().count() < self.min_chars || self.is_redundant(title, summary) {
            return String::new();
        }
        self.cap(summary)
    }

    /// Enforce the display cap only, for summaries written by hand.
    pub fn cap(&self, summary: &str) -> String {
        truncate_with_marker(summary.trim(), self.max_chars, &self.ellipsis)
    }

    /// True when the summary carries nothing beyond the title.
    pub fn is_redundant(&self, title: &str, summary: &str) -> bool {
        let summary_core = core(summary);
        if summary_core.is_empty() {
            return true;
        }
        let title_core = core(title);
        let overlaps = title_core.contains(&summary_core) || summary_core.contains(&title_core);
        let diff = title_core
            .chars()
            .count()
            .abs_diff(summary_core.chars().count());
        overlaps && diff < self.length_slack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(&TextConfig::default())
    }

    fn reducer() -> SummaryReducer {
        SummaryReducer::new(&TextConfig::default())
    }

    #[test]
    fn test_split_source_suffix_basic() {
        let split = split_source_suffix("Breaking News - Example Times", 60);
        assert_eq!(split.title, "Breaking News");
        assert_eq!(split.publisher.as_deref(), Some("Example Times"));
    }

    #[test]
    fn test_split_source_suffix_no_separator() {
        let split = split_source_suffix("  NXP samples new UWB SoC ", 60);
        assert_eq!(split.title, "NXP samples new UWB SoC");
        assert_eq!(split.publisher, None);
    }

    #[test]
    fn test_split_source_suffix_uses_last_separator() {
        let split = split_source_suffix("UWB - the next wave - Wire Daily", 60);
        assert_eq!(split.title, "UWB - the next wave");
        assert_eq!(split.publisher.as_deref(), Some("Wire Daily"));
    }

    #[test]
    fn test_split_source_suffix_rejects_empty_sides_and_long_suffix() {
        assert_eq!(split_source_suffix(" - Wire", 60).publisher, None);
        assert_eq!(split_source_suffix("Headline - ", 60).publisher, None);
        let long = "Headline - this is clearly part of a very long headline and not a name";
        let split = split_source_suffix(long, 20);
        assert_eq!(split.title, long);
        assert_eq!(split.publisher, None);
    }

    #[test]
    fn test_split_source_suffix_ignores_unspaced_hyphen() {
        let split = split_source_suffix("Ultra-Wideband grows", 60);
        assert_eq!(split.title, "Ultra-Wideband grows");
        assert_eq!(split.publisher, None);
    }

    #[test]
    fn test_normalize_strips_markup_and_whitespace() {
        let raw = "<p>UWB   radios</p>\n<p>are <b>everywhere</b>.</p>";
        let out = normalizer().normalize(raw, None);
        assert!(!out.fell_back);
        assert_eq!(out.text, "UWB radios are everywhere.");
    }

    #[test]
    fn test_normalize_keeps_inline_markup_words_intact() {
        let raw = "Apple's U<b>1</b> chip uses <i>ultra</i>-wideband, per <a href='x'>NXP</a>.";
        let out = normalizer().normalize(raw, None);
        assert_eq!(out.text, "Apple's U1 chip uses ultra-wideband, per NXP.");
    }

    #[test]
    fn test_normalize_separates_block_text_and_drops_scripts() {
        let raw = "<ul><li>FiRa</li><li>CCC</li></ul>line one<br>line two<script>track()</script>";
        let out = normalizer().normalize(raw, None);
        assert_eq!(out.text, "FiRa CCC line one line two");
    }

    #[test]
    fn test_normalize_failure_falls_back_to_raw_prefix() {
        let normalizer = normalizer();
        let raw = format!("  <p>{}</p>  ", "x".repeat(400));
        let err = regex::Regex::new("(").unwrap_err();
        let out = normalizer.settle(&raw, Err(err));
        assert!(out.fell_back);
        assert_eq!(out.text.chars().count(), 200);
        assert!(out.text.starts_with("<p>xxx"));
    }

    #[test]
    fn test_split_source_suffix_applies_to_any_feed_title() {
        // The heuristic cannot tell a publisher from a trailing subtitle.
        let split = split_source_suffix("UWB explained - Part 2", 60);
        assert_eq!(split.title, "UWB explained");
        assert_eq!(split.publisher.as_deref(), Some("Part 2"));
    }

    #[test]
    fn test_normalize_plain_text_round_trip() {
        let text = "Qorvo ships a new UWB transceiver for smart tags.";
        assert_eq!(normalizer().normalize(text, None).text, text);
        assert_eq!(normalizer().normalize(&format!("  {text}\n"), None).text, text);
    }

    #[test]
    fn test_normalize_decodes_entities() {
        let out = normalizer().normalize("Apple&nbsp;&amp;&nbsp;NXP", None);
        assert_eq!(out.text, "Apple & NXP");
    }

    #[test]
    fn test_normalize_removes_boilerplate() {
        let raw = "FiRa publishes new test suite. Read more";
        assert_eq!(
            normalizer().normalize(raw, None).text,
            "FiRa publishes new test suite."
        );
    }

    #[test]
    fn test_normalize_removes_source_label_and_dangling_separators() {
        let raw = "<a href=\"https://x\">UWB market grows</a>&nbsp;&nbsp;<font color=\"#6f6f6f\">Example Times</font>";
        let out = normalizer().normalize(raw, Some("example times"));
        assert_eq!(out.text, "UWB market grows");

        let out = normalizer().normalize("Chip launch announced - Wire Daily", Some("Wire Daily"));
        assert_eq!(out.text, "Chip launch announced");
    }

    #[test]
    fn test_normalize_ignores_trivial_label() {
        let out = normalizer().normalize("apple maps adds UWB", Some("ap"));
        assert_eq!(out.text, "apple maps adds UWB");
    }

    #[test]
    fn test_reduce_suppresses_title_restatement() {
        let title = "Qorvo unveils new UWB chip for trackers";
        assert!(reducer().is_redundant(title, "QORVO unveils new UWB-chip, for trackers."));
        assert_eq!(reducer().reduce(title, "Qorvo unveils new UWB chip for trackers!"), "");
    }

    #[test]
    fn test_reduce_suppresses_short_summary() {
        assert_eq!(reducer().reduce("Title", "Too short"), "");
    }

    #[test]
    fn test_reduce_suppresses_symbol_only_summary() {
        assert!(reducer().is_redundant("Title", "--- ... ---"));
    }

    #[test]
    fn test_reduce_keeps_informative_summary() {
        let summary = "The new chipset doubles ranging accuracy while cutting power draw in half.";
        assert_eq!(reducer().reduce("Qorvo launches chipset", summary), summary);
    }

    #[test]
    fn test_reduce_keeps_summary_that_extends_title_substantially() {
        let title = "UWB market grows";
        let summary = "UWB market grows as automakers adopt digital keys across new models";
        assert_eq!(reducer().reduce(title, summary), summary);
    }

    #[test]
    fn test_reduce_truncates_with_ellipsis() {
        let summary = "word ".repeat(100);
        let out = reducer().reduce("Unrelated title", &summary);
        assert!(out.chars().count() <= 200);
        assert!(out.ends_with("..."));
    }
}
