use crate::error::{ChunkerError, Result};
use crate::types::{HeaderLevel, Section};

/// Splits Markdown text into header-delimited sections (levels 1-4)
#[derive(Debug, Clone, Copy)]
pub struct SectionSplitter {
    strip_headers: bool,
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SectionSplitter {
    #[must_use]
    pub const fn new(strip_headers: bool) -> Self {
        Self { strip_headers }
    }

    /// Split a document into sections in document order.
    ///
    /// Each header starts a new section and clears every recorded header at the
    /// same or a deeper level. Header-looking lines inside fenced code blocks are
    /// content. Sections without any non-blank content are skipped, so
    /// `order_index` is contiguous over the returned sections.
    pub fn split(&self, markdown: &str) -> Result<Vec<Section>> {
        if markdown.trim().is_empty() {
            return Err(ChunkerError::EmptyContent);
        }

        let mut sections = Vec::new();
        let mut headers: [Option<String>; 4] = Default::default();
        let mut lines: Vec<&str> = Vec::new();
        let mut fence: Option<&'static str> = None;

        for raw in markdown.lines() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if let Some(marker) = fence {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
                lines.push(line);
                continue;
            }

            if let Some(marker) = fence_marker(trimmed) {
                fence = Some(marker);
                lines.push(line);
                continue;
            }

            if let Some((level, title)) = parse_header(trimmed) {
                flush_section(&mut sections, &headers, &mut lines);
                for slot in &mut headers[level.index()..] {
                    *slot = None;
                }
                headers[level.index()] = Some(title.to_string());
                if !self.strip_headers {
                    lines.push(line);
                }
                continue;
            }

            lines.push(line);
        }

        flush_section(&mut sections, &headers, &mut lines);

        log::debug!("Split document into {} sections", sections.len());
        Ok(sections)
    }
}

fn flush_section(sections: &mut Vec<Section>, headers: &[Option<String>; 4], lines: &mut Vec<&str>) {
    let text = lines.join("\n");
    lines.clear();

    let text = text.trim_matches('\n');
    if text.trim().is_empty() {
        return;
    }

    let order_index = sections.len();
    sections.push(Section::new(text.to_string(), headers.clone(), order_index));
}

fn fence_marker(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// `## Title` → (H2, "Title"). Five or more `#` is not a header.
fn parse_header(trimmed: &str) -> Option<(HeaderLevel, &str)> {
    let depth = trimmed.bytes().take_while(|&b| b == b'#').count();
    let level = HeaderLevel::from_depth(depth)?;
    let rest = &trimmed[depth..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some((level, rest.trim()))
}
