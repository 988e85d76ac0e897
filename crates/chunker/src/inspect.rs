//! Debug view of how each section of a document was classified.

use serde::Serialize;

use crate::toc::{RuleOutcome, TocFilter};
use crate::types::Section;

/// Words that suggest a section carries course or programme details
const INSTRUCTIONAL_KEYWORDS: &[&str] = &[
    "credit",
    "credits",
    "course",
    "courses",
    "semester",
    "lecture",
    "practical",
    "lab",
    "hours",
    "category",
    "programme",
    "program",
    "curriculum",
    "structure",
];

const TOC_HEADER_KEYWORDS: &[&str] = &["table of contents", "contents", "index"];

/// Share of the document, from the start, counted as "early"
const EARLY_SECTION_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    TocCandidate,
    Instructional,
}

/// Signals gathered for one section. Only `toc_rules` drives classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionSignals {
    pub toc_rules: Vec<RuleOutcome>,
    pub has_instructional_language: bool,
    pub is_toc_header: bool,
    pub early_section: bool,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionInspection {
    pub section_type: SectionKind,
    #[serde(flatten)]
    pub section: Section,
    pub debug: InspectionSignals,
}

impl SectionInspection {
    #[must_use]
    pub fn is_toc(&self) -> bool {
        self.section_type == SectionKind::TocCandidate
    }
}

pub(crate) fn inspect_section(filter: &TocFilter, section: Section, total: usize) -> SectionInspection {
    let toc_rules = filter.evaluate(&section.text, section.order_index);
    let section_type = if toc_rules.iter().all(|outcome| outcome.holds) {
        SectionKind::TocCandidate
    } else {
        SectionKind::Instructional
    };

    let debug = InspectionSignals {
        toc_rules,
        has_instructional_language: has_instructional_language(&section.text),
        is_toc_header: is_toc_header(section.level_1.as_deref()),
        early_section: (section.order_index as f64 / total.max(1) as f64) < EARLY_SECTION_RATIO,
        line_count: section.text.lines().filter(|l| !l.trim().is_empty()).count(),
    };

    SectionInspection {
        section_type,
        section,
        debug,
    }
}

fn has_instructional_language(text: &str) -> bool {
    let lower = text.to_lowercase();
    INSTRUCTIONAL_KEYWORDS.iter().any(|word| lower.contains(word))
}

fn is_toc_header(level_1: Option<&str>) -> bool {
    let lower = level_1.unwrap_or_default().to_lowercase();
    TOC_HEADER_KEYWORDS.iter().any(|k| lower.contains(k))
}
