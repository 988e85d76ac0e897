use crate::config::ChunkerConfig;
use crate::types::{HeaderLevel, Section};

/// Levels tried, coarsest first, before falling back to line splitting
const SPLIT_LEVELS: [HeaderLevel; 3] = [HeaderLevel::H2, HeaderLevel::H3, HeaderLevel::H4];

/// Splits a group of sections into chunks that fit a character budget,
/// preferring header boundaries over arbitrary offsets
#[derive(Debug, Clone, Copy)]
pub struct BoundedChunker {
    max_chars: usize,
    fallback_chunk_size: usize,
}

impl BoundedChunker {
    #[must_use]
    pub const fn new(max_chars: usize, fallback_chunk_size: usize) -> Self {
        Self {
            max_chars,
            fallback_chunk_size,
        }
    }

    #[must_use]
    pub const fn from_config(config: &ChunkerConfig) -> Self {
        Self::new(config.max_chars, config.fallback_chunk_size)
    }

    /// Chunk texts for one group of sections, in document order
    #[must_use]
    pub fn chunk_group(&self, sections: &[&Section]) -> Vec<String> {
        self.split_recursive(sections, &SPLIT_LEVELS)
    }

    fn split_recursive(&self, sections: &[&Section], levels: &[HeaderLevel]) -> Vec<String> {
        if sections.is_empty() {
            return Vec::new();
        }

        let combined = join_sections(sections);
        if char_len(&combined) <= self.max_chars {
            return vec![combined];
        }

        let Some((level, finer)) = levels.split_first() else {
            log::debug!(
                "No header level left for {} chars, using line splitter",
                char_len(&combined)
            );
            return split_table_safe(&combined, self.fallback_chunk_size);
        };

        let buckets = bucket_by_header(sections, *level);
        log::debug!(
            "Splitting {} sections into {} buckets at {:?}",
            sections.len(),
            buckets.len(),
            level
        );

        buckets
            .iter()
            .flat_map(|bucket| self.split_recursive(&bucket.sections, finer))
            .collect()
    }
}

/// Sections sharing one header value (or lacking the level entirely)
struct HeaderBucket<'a> {
    key: Option<&'a str>,
    sections: Vec<&'a Section>,
}

/// Group by header text at `level`, buckets ordered by first appearance
fn bucket_by_header<'a>(sections: &[&'a Section], level: HeaderLevel) -> Vec<HeaderBucket<'a>> {
    let mut buckets: Vec<HeaderBucket<'a>> = Vec::new();
    for &section in sections {
        let key = section.header(level);
        match buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.sections.push(section),
            None => buckets.push(HeaderBucket {
                key,
                sections: vec![section],
            }),
        }
    }
    buckets
}

fn join_sections(sections: &[&Section]) -> String {
    sections
        .iter()
        .map(|section| section.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Line-based splitter that never cuts through a Markdown table.
///
/// A line containing `|` opens a table; the next blank line closes it. A new chunk
/// is started only outside a table, when the pending line would push the buffer
/// over `budget`. Line endings are kept, so the chunks concatenate back to `text`.
#[must_use]
pub fn split_table_safe(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut in_table = false;

    for line in text.split_inclusive('\n') {
        if line.contains('|') {
            in_table = true;
        } else if in_table && line.trim().is_empty() {
            in_table = false;
        }

        let line_len = char_len(line);
        if !in_table && !current.is_empty() && current_len + line_len > budget {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
