use crate::bounded::BoundedChunker;
use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::identity::ChunkIdentityAssigner;
use crate::inspect::{inspect_section, SectionInspection};
use crate::sections::SectionSplitter;
use crate::toc::TocFilter;
use crate::types::{ChunkedDocument, ChunkingReport, Section};

/// Main chunker interface for processing documents
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }
}

impl Chunker {
    /// Create a new chunker, rejecting contradictory budgets
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Split a document into header-delimited sections
    pub fn split_sections(&self, markdown: &str) -> Result<Vec<Section>> {
        SectionSplitter::new(self.config.strip_headers).split(markdown)
    }

    #[must_use]
    pub const fn toc_filter(&self) -> TocFilter {
        TocFilter::from_config(&self.config)
    }

    /// Full ingestion path: split, drop TOC sections, bound, assign ids
    pub fn chunk_document(&self, markdown: &str, document_name: &str) -> Result<ChunkedDocument> {
        let mut sections = self.split_sections(markdown)?;
        let mut report = ChunkingReport {
            sections_total: sections.len(),
            ..Default::default()
        };

        report.toc_sections_dropped = self.toc_filter().retain_content(&mut sections);
        if sections.is_empty() {
            log::warn!("{document_name}: no sections left after TOC filtering");
        }

        let bounded = BoundedChunker::from_config(&self.config);
        let mut assigner = ChunkIdentityAssigner::new(document_name, self.config.min_useful_chars);
        let mut chunks = Vec::new();

        for (title, group) in group_by_level_1(&sections) {
            let texts = bounded.chunk_group(&group);
            chunks.extend(assigner.assign(title, texts, &mut report));
        }

        if report.empty_chunks_dropped > 0 {
            log::warn!(
                "{document_name}: filtered out {} empty chunks",
                report.empty_chunks_dropped
            );
        }
        if report.tiny_chunks > 0 {
            log::warn!(
                "{document_name}: {} chunks are under {} chars",
                report.tiny_chunks,
                self.config.min_useful_chars
            );
        }
        log::info!(
            "{document_name}: {} sections ({} TOC dropped) -> {} chunks",
            report.sections_total,
            report.toc_sections_dropped,
            report.chunks_emitted
        );

        Ok(ChunkedDocument {
            document: document_name.to_string(),
            chunks,
            report,
        })
    }

    /// Per-section classification with the signals behind it
    pub fn inspect_sections(&self, markdown: &str) -> Result<Vec<SectionInspection>> {
        let sections = self.split_sections(markdown)?;
        let filter = self.toc_filter();
        let total = sections.len();
        Ok(sections
            .into_iter()
            .map(|section| inspect_section(&filter, section, total))
            .collect())
    }
}

/// Group sections by top-level title, groups ordered by first appearance
fn group_by_level_1(sections: &[Section]) -> Vec<(&str, Vec<&Section>)> {
    let mut groups: Vec<(&str, Vec<&Section>)> = Vec::new();
    for section in sections {
        let title = section.top_level_title();
        match groups.iter_mut().find(|(key, _)| *key == title) {
            Some((_, members)) => members.push(section),
            None => groups.push((title, vec![section])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HANDBOOK: &str = "\
Cover page text for the handbook.

# Admissions
Applications open in March and close in May each year.

## Eligibility
Applicants need a secondary school diploma.

# Fees
Tuition is payable per semester.
";

    #[test]
    fn test_chunk_document() {
        let doc = Chunker::default()
            .chunk_document(HANDBOOK, "Student Handbook")
            .unwrap();

        let ids: Vec<&str> = doc.chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "student_handbook__unknown__chunk_000",
                "student_handbook__admissions__chunk_000",
                "student_handbook__fees__chunk_000",
            ]
        );
        assert_eq!(
            doc.chunks[1].text,
            "Applications open in March and close in May each year.\n\
             Applicants need a secondary school diploma."
        );
        assert_eq!(doc.chunks[0].metadata.level_1, "UNKNOWN");
        assert_eq!(doc.report.sections_total, 4);
        assert_eq!(doc.report.toc_sections_dropped, 0);
        assert_eq!(doc.report.chunks_emitted, 3);
        assert_eq!(doc.report.tiny_chunks, 3);
    }

    #[test]
    fn test_chunk_empty_content() {
        let err = Chunker::default().chunk_document("", "doc").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkerConfig {
            max_chars: 100,
            fallback_chunk_size: 200,
            ..Default::default()
        };
        let err = Chunker::new(config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn non_contiguous_top_level_sections_share_a_group() {
        let doc = "# A\nfirst\n# B\nsecond\n# A\nthird";
        let chunked = Chunker::default().chunk_document(doc, "d").unwrap();
        let texts: Vec<&str> = chunked.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first\nthird", "second"]);
    }

    #[test]
    fn test_inspect_sections() {
        let inspections = Chunker::default().inspect_sections(HANDBOOK).unwrap();
        assert_eq!(inspections.len(), 4);
        assert!(inspections.iter().all(|i| !i.is_toc()));
        assert_eq!(inspections[2].section.level_2.as_deref(), Some("Eligibility"));
    }
}
