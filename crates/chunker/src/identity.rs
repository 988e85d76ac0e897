use std::collections::HashMap;

use crate::types::{Chunk, ChunkingReport};

/// Separator between the segments of a chunk id
pub const ID_SEPARATOR: &str = "__";

/// Slug used when a title has no ASCII alphanumerics at all
const EMPTY_SLUG: &str = "untitled";

/// Lowercase, collapse every run outside `[a-z0-9]` into `_`, trim `_`
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch);
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// `<doc-slug>__<section-slug>__chunk_<NNN>`
#[must_use]
pub fn format_chunk_id(doc_slug: &str, section_slug: &str, sequence: usize) -> String {
    format!("{doc_slug}{ID_SEPARATOR}{section_slug}{ID_SEPARATOR}chunk_{sequence:03}")
}

fn slug_or_placeholder(text: &str) -> String {
    let slug = slugify(text);
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Assigns stable ids to the chunk texts of one document.
///
/// Sequence numbers are kept per section slug, so two titles that slug the same
/// way continue one sequence instead of colliding.
pub struct ChunkIdentityAssigner {
    document: String,
    doc_slug: String,
    min_useful_chars: usize,
    sequences: HashMap<String, usize>,
}

impl ChunkIdentityAssigner {
    #[must_use]
    pub fn new(document: impl Into<String>, min_useful_chars: usize) -> Self {
        let document = document.into();
        let doc_slug = slug_or_placeholder(&document);
        Self {
            document,
            doc_slug,
            min_useful_chars,
            sequences: HashMap::new(),
        }
    }

    /// Turn the chunk texts of one top-level section into chunks.
    ///
    /// Texts that are blank after trimming are dropped without consuming a
    /// sequence number. Texts shorter than the useful minimum are kept but counted.
    pub fn assign(
        &mut self,
        level_1: &str,
        texts: Vec<String>,
        report: &mut ChunkingReport,
    ) -> Vec<Chunk> {
        let section_slug = slug_or_placeholder(level_1);
        let mut chunks = Vec::with_capacity(texts.len());

        for text in texts {
            if text.trim().is_empty() {
                report.empty_chunks_dropped += 1;
                continue;
            }

            let sequence = self.sequences.entry(section_slug.clone()).or_insert(0);
            let chunk_id = format_chunk_id(&self.doc_slug, &section_slug, *sequence);
            *sequence += 1;

            let chunk = Chunk::new(chunk_id, text, self.document.as_str(), level_1);
            if chunk.char_count() < self.min_useful_chars {
                report.tiny_chunks += 1;
                log::debug!(
                    "Chunk {} has only {} chars",
                    chunk.chunk_id,
                    chunk.char_count()
                );
            }
            chunks.push(chunk);
        }

        report.chunks_emitted += chunks.len();
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Fee Structure 2024-25"), "fee_structure_2024_25");
        assert_eq!(slugify("  --Hello,   World!--  "), "hello_world");
        assert_eq!(slugify("UNKNOWN"), "unknown");
        assert_eq!(slugify("a__b"), "a_b");
        assert_eq!(slugify("Café Menu"), "caf_menu");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn test_chunk_id_format() {
        assert_eq!(
            format_chunk_id("handbook", "fees", 7),
            "handbook__fees__chunk_007"
        );
    }

    #[test]
    fn sequence_skips_empty_texts() {
        let mut report = ChunkingReport::default();
        let mut assigner = ChunkIdentityAssigner::new("Student Handbook", 0);
        let chunks = assigner.assign(
            "Fees",
            vec!["first".into(), "  \n ".into(), "second".into()],
            &mut report,
        );

        let ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "student_handbook__fees__chunk_000",
                "student_handbook__fees__chunk_001"
            ]
        );
        assert_eq!(report.empty_chunks_dropped, 1);
        assert_eq!(report.chunks_emitted, 2);
        assert_eq!(chunks[1].metadata.document, "Student Handbook");
        assert_eq!(chunks[1].metadata.level_1, "Fees");
        assert_eq!(chunks[1].metadata.char_count, 6);
    }

    #[test]
    fn sequences_restart_per_section() {
        let mut report = ChunkingReport::default();
        let mut assigner = ChunkIdentityAssigner::new("doc", 0);
        let fees = assigner.assign("Fees", vec!["a".into(), "b".into()], &mut report);
        let dates = assigner.assign("Dates", vec!["c".into()], &mut report);
        assert_eq!(fees[1].chunk_id, "doc__fees__chunk_001");
        assert_eq!(dates[0].chunk_id, "doc__dates__chunk_000");
    }

    #[test]
    fn colliding_slugs_share_one_sequence() {
        let mut report = ChunkingReport::default();
        let mut assigner = ChunkIdentityAssigner::new("doc", 0);
        let a = assigner.assign("Fees!", vec!["a".into()], &mut report);
        let b = assigner.assign("Fees?", vec!["b".into()], &mut report);
        assert_eq!(a[0].chunk_id, "doc__fees__chunk_000");
        assert_eq!(b[0].chunk_id, "doc__fees__chunk_001");
    }

    #[test]
    fn punctuation_only_titles_get_placeholder_slug() {
        let mut report = ChunkingReport::default();
        let mut assigner = ChunkIdentityAssigner::new("***", 0);
        let chunks = assigner.assign("§", vec!["body".into()], &mut report);
        assert_eq!(chunks[0].chunk_id, "untitled__untitled__chunk_000");
    }

    #[test]
    fn counts_tiny_chunks() {
        let mut report = ChunkingReport::default();
        let mut assigner = ChunkIdentityAssigner::new("doc", 100);
        assigner.assign("S", vec!["short".into(), "x".repeat(100)], &mut report);
        assert_eq!(report.tiny_chunks, 1);
    }
}
