use serde::{Deserialize, Serialize};

/// Configuration for document chunking behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Hard budget (in characters) for chunks produced by structural splitting
    pub max_chars: usize,

    /// Budget for the line-based fallback splitter, kept below `max_chars`
    pub fallback_chunk_size: usize,

    /// Chunks shorter than this are reported as too small to stand alone
    pub min_useful_chars: usize,

    /// Drop the `#`..`####` header lines from section text
    pub strip_headers: bool,

    /// Last section position (0-based) that may still be a table of contents
    pub toc_max_order_index: usize,

    /// Numbered outline cells (`| 3.2.1 |`) required before a section counts as a TOC
    pub toc_min_outline_refs: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            fallback_chunk_size: 1800,
            min_useful_chars: 100,
            strip_headers: true,
            toc_max_order_index: 2,
            toc_min_outline_refs: 10,
        }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chars == 0 {
            return Err("max_chars must be > 0".to_string());
        }

        if self.fallback_chunk_size == 0 {
            return Err("fallback_chunk_size must be > 0".to_string());
        }

        if self.fallback_chunk_size >= self.max_chars {
            return Err(format!(
                "fallback_chunk_size ({}) must be smaller than max_chars ({})",
                self.fallback_chunk_size, self.max_chars
            ));
        }

        Ok(())
    }
}
