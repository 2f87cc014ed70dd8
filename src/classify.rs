//! Keyword-based category assignment.

use crate::config::CategoryRule;

/// Assigns exactly one category per article from ordered keyword rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    default_label: String,
}

impl Classifier {
    pub fn new(rules: &[CategoryRule], default_label: &str) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CategoryRule {
                label: rule.label.clone(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            rules,
            default_label: default_label.to_string(),
        }
    }

    /// Label of the first rule with a keyword in `title + " " + summary`,
    /// or the catch-all label.
    pub fn classify(&self, title: &str, summary: &str) -> &str {
        let text = format!("{title} {summary}").to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|rule| rule.label.as_str())
            .unwrap_or(&self.default_label)
    }

    /// Every label this classifier can return, in display order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::with_capacity(self.rules.len() + 1);
        for label in self
            .rules
            .iter()
            .map(|r| r.label.as_str())
            .chain(std::iter::once(self.default_label.as_str()))
        {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}
