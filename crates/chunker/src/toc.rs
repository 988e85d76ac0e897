//! Table-of-contents detection.
//!
//! A section is dropped only when every rule in [`TOC_RULES`] holds.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::config::ChunkerConfig;
use crate::types::Section;

type RuleCheck = fn(&TocFilter, &str, usize) -> bool;

/// One named predicate of the TOC classifier
pub struct TocRule {
    pub name: &'static str,
    check: RuleCheck,
}

impl TocRule {
    #[must_use]
    pub fn holds(&self, filter: &TocFilter, text: &str, order_index: usize) -> bool {
        (self.check)(filter, text, order_index)
    }
}

/// Classifier rules, evaluated in order; all must hold
pub const TOC_RULES: &[TocRule] = &[
    TocRule {
        name: "near_document_start",
        check: near_document_start,
    },
    TocRule {
        name: "has_markdown_table",
        check: has_markdown_table_rule,
    },
    TocRule {
        name: "mentions_contents_and_page",
        check: mentions_contents_and_page,
    },
    TocRule {
        name: "numbered_outline_entries",
        check: numbered_outline_entries,
    },
];

/// Outcome of a single rule, for inspection output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub holds: bool,
}

/// Classifies sections as tables of contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocFilter {
    max_order_index: usize,
    min_outline_refs: usize,
}

impl Default for TocFilter {
    fn default() -> Self {
        Self::from_config(&ChunkerConfig::default())
    }
}

impl TocFilter {
    #[must_use]
    pub const fn new(max_order_index: usize, min_outline_refs: usize) -> Self {
        Self {
            max_order_index,
            min_outline_refs,
        }
    }

    #[must_use]
    pub const fn from_config(config: &ChunkerConfig) -> Self {
        Self::new(config.toc_max_order_index, config.toc_min_outline_refs)
    }

    /// True when the section text at `order_index` looks like a table of contents
    #[must_use]
    pub fn is_toc_candidate(&self, text: &str, order_index: usize) -> bool {
        TOC_RULES
            .iter()
            .all(|rule| rule.holds(self, text, order_index))
    }

    /// Evaluate every rule without short-circuiting
    #[must_use]
    pub fn evaluate(&self, text: &str, order_index: usize) -> Vec<RuleOutcome> {
        TOC_RULES
            .iter()
            .map(|rule| RuleOutcome {
                rule: rule.name,
                holds: rule.holds(self, text, order_index),
            })
            .collect()
    }

    /// Keep the sections that are not TOC candidates; returns how many were dropped
    pub fn retain_content(&self, sections: &mut Vec<Section>) -> usize {
        let before = sections.len();
        sections.retain(|section| {
            let toc = self.is_toc_candidate(&section.text, section.order_index);
            if toc {
                log::info!(
                    "Dropping table-of-contents section #{} ({})",
                    section.order_index,
                    section.top_level_title()
                );
            }
            !toc
        });
        before - sections.len()
    }
}

/// Default-configured TOC check
#[must_use]
pub fn is_toc_candidate(text: &str, order_index: usize) -> bool {
    TocFilter::default().is_toc_candidate(text, order_index)
}

/// A pipe-delimited separator row (`|---|` or `| :--: |`)
#[must_use]
pub fn contains_markdown_table(text: &str) -> bool {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    let delimiter =
        DELIMITER.get_or_init(|| Regex::new(r"\|\s*[-:]+\s*\|").expect("static regex"));
    text.contains("|---") || delimiter.is_match(text)
}

/// Count of `| 3.2.1 |`-style cells
#[must_use]
pub fn count_outline_refs(text: &str) -> usize {
    static OUTLINE: OnceLock<Regex> = OnceLock::new();
    let outline =
        OUTLINE.get_or_init(|| Regex::new(r"\|\s*\d+\.[\d.]*\s*\|").expect("static regex"));
    outline.find_iter(text).count()
}

fn near_document_start(filter: &TocFilter, _text: &str, order_index: usize) -> bool {
    order_index <= filter.max_order_index
}

fn has_markdown_table_rule(_filter: &TocFilter, text: &str, _order_index: usize) -> bool {
    contains_markdown_table(text)
}

fn mentions_contents_and_page(_filter: &TocFilter, text: &str, _order_index: usize) -> bool {
    let lower = text.to_lowercase();
    lower.contains("contents") && lower.contains("page")
}

fn numbered_outline_entries(filter: &TocFilter, text: &str, _order_index: usize) -> bool {
    count_outline_refs(text) >= filter.min_outline_refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc_text(rows: usize) -> String {
        let mut text = String::from("Table of Contents\n\n| Section | Title | Page |\n|---|---|---|\n");
        for i in 0..rows {
            text.push_str(&format!("| 3.2.{i} | Topic {i} | {} |\n", i + 4));
        }
        text
    }

    #[test]
    fn detects_obvious_table_of_contents() {
        assert!(is_toc_candidate(&toc_text(12), 0));
        assert!(is_toc_candidate(&toc_text(12), 2));
    }

    #[test]
    fn late_sections_are_never_toc() {
        assert!(!is_toc_candidate(&toc_text(12), 3));
    }

    #[test]
    fn needs_enough_outline_rows() {
        assert!(!is_toc_candidate(&toc_text(9), 0));
        assert!(is_toc_candidate(&toc_text(10), 0));
    }

    #[test]
    fn needs_both_keywords() {
        let text = toc_text(12).replace("Page", "Pg");
        assert!(!is_toc_candidate(&text, 0));

        let text = toc_text(12).replace("Contents", "Overview");
        assert!(!is_toc_candidate(&text, 0));
    }

    #[test]
    fn needs_a_delimiter_row() {
        let text = toc_text(12).replace("|---|---|---|\n", "");
        assert!(!contains_markdown_table(&text));
        assert!(!is_toc_candidate(&text, 0));
    }

    #[test]
    fn recognises_colon_delimiters() {
        assert!(contains_markdown_table("| a | b |\n| :--: | --- |\n"));
        assert!(!contains_markdown_table("plain | text"));
    }

    #[test]
    fn counts_outline_cells() {
        assert_eq!(count_outline_refs("| 1. | x |"), 1);
        assert_eq!(count_outline_refs("| 3.2.1 |"), 1);
        assert_eq!(count_outline_refs("| 12 |"), 0);
        assert_eq!(count_outline_refs("| 2.1 | Fees | 14 |\n| 2.2 | Dates | 15 |"), 2);
    }

    #[test]
    fn evaluate_reports_each_rule_by_name() {
        let outcomes = TocFilter::default().evaluate(&toc_text(3), 5);
        let names: Vec<&str> = outcomes.iter().map(|o| o.rule).collect();
        assert_eq!(
            names,
            vec![
                "near_document_start",
                "has_markdown_table",
                "mentions_contents_and_page",
                "numbered_outline_entries"
            ]
        );
        let holds: Vec<bool> = outcomes.iter().map(|o| o.holds).collect();
        assert_eq!(holds, vec![false, true, true, false]);
    }

    #[test]
    fn thresholds_come_from_config() {
        let lenient = TocFilter::new(5, 3);
        assert!(lenient.is_toc_candidate(&toc_text(3), 5));
    }

    #[test]
    fn retain_content_drops_only_toc_sections() {
        let mut sections = vec![
            Section::new(toc_text(12), Default::default(), 0),
            Section::new("Real content".to_string(), Default::default(), 1),
        ];
        let dropped = TocFilter::default().retain_content(&mut sections);
        assert_eq!(dropped, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "Real content");
    }
}
