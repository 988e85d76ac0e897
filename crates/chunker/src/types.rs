use serde::{Deserialize, Serialize};

/// Header text used when a section has no enclosing level-1 header
pub const UNKNOWN_SECTION: &str = "UNKNOWN";

/// Markdown header depth (`#` through `####`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeaderLevel {
    /// All levels, coarsest first
    pub const ALL: [Self; 4] = [Self::H1, Self::H2, Self::H3, Self::H4];

    /// Map a count of leading `#` characters to a level
    #[must_use]
    pub const fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            _ => None,
        }
    }

    /// Zero-based slot of this level
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::H1 => 0,
            Self::H2 => 1,
            Self::H3 => 2,
            Self::H4 => 3,
        }
    }
}

/// A header-delimited span of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Raw content between this header and the next one
    pub text: String,

    /// Nearest enclosing `#` header
    pub level_1: Option<String>,

    /// Nearest enclosing `##` header
    pub level_2: Option<String>,

    /// Nearest enclosing `###` header
    pub level_3: Option<String>,

    /// Nearest enclosing `####` header
    pub level_4: Option<String>,

    /// Position of this section in document order
    pub order_index: usize,
}

impl Section {
    /// Build a section from its header path
    #[must_use]
    pub fn new(text: String, headers: [Option<String>; 4], order_index: usize) -> Self {
        let [level_1, level_2, level_3, level_4] = headers;
        Self {
            text,
            level_1,
            level_2,
            level_3,
            level_4,
            order_index,
        }
    }

    /// Header text at the given level, if any
    #[must_use]
    pub fn header(&self, level: HeaderLevel) -> Option<&str> {
        match level {
            HeaderLevel::H1 => self.level_1.as_deref(),
            HeaderLevel::H2 => self.level_2.as_deref(),
            HeaderLevel::H3 => self.level_3.as_deref(),
            HeaderLevel::H4 => self.level_4.as_deref(),
        }
    }

    /// Top-level title, falling back to [`UNKNOWN_SECTION`]
    #[must_use]
    pub fn top_level_title(&self) -> &str {
        self.level_1.as_deref().unwrap_or(UNKNOWN_SECTION)
    }
}

/// A finalized, persistable text unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// `<doc-slug>__<section-slug>__chunk_<NNN>`
    pub chunk_id: String,

    /// Chunk content, never empty
    pub text: String,

    /// Provenance of this chunk
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk; `char_count` is derived from the text
    #[must_use]
    pub fn new(
        chunk_id: String,
        text: String,
        document: impl Into<String>,
        level_1: impl Into<String>,
    ) -> Self {
        let char_count = text.chars().count();
        Self {
            chunk_id,
            text,
            metadata: ChunkMetadata {
                document: document.into(),
                level_1: level_1.into(),
                char_count,
            },
        }
    }

    #[must_use]
    pub const fn char_count(&self) -> usize {
        self.metadata.char_count
    }
}

/// Metadata stored alongside every chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Document name the chunk was cut from
    pub document: String,

    /// Title of the originating top-level section
    pub level_1: String,

    /// Length of the chunk text in characters
    pub char_count: usize,
}

/// Counters for non-fatal structural anomalies seen while chunking a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingReport {
    pub sections_total: usize,
    pub toc_sections_dropped: usize,
    pub empty_chunks_dropped: usize,
    pub tiny_chunks: usize,
    pub chunks_emitted: usize,
}

impl ChunkingReport {
    /// Sections that survived TOC filtering
    #[must_use]
    pub const fn sections_retained(&self) -> usize {
        self.sections_total.saturating_sub(self.toc_sections_dropped)
    }

    /// True when the document produced something worth a second look
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.sections_retained() == 0 || self.tiny_chunks > 0
    }
}

/// All chunks produced for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedDocument {
    pub document: String,
    pub chunks: Vec<Chunk>,
    pub report: ChunkingReport,
}
