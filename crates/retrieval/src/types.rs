use docqa_chunker::Chunk;
use serde::{Deserialize, Serialize};

use crate::section_key::section_key;

/// Fixed reply when the corpus has nothing relevant to say
pub const NO_ANSWER_MESSAGE: &str = "The document does not clearly specify this.";

/// One similarity-search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub score: f32,
    pub chunk: Chunk,
}

impl ScoredCandidate {
    #[must_use]
    pub const fn new(score: f32, chunk: Chunk) -> Self {
        Self { score, chunk }
    }

    #[must_use]
    pub fn chunk_id(&self) -> &str {
        &self.chunk.chunk_id
    }

    #[must_use]
    pub fn section_key(&self) -> &str {
        section_key(&self.chunk.chunk_id)
    }
}

/// How confidently the corpus can answer a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Nothing relevant; results are diagnostic only
    None,
    /// Related content, not confidently sufficient
    Partial,
    /// Directly answerable from a curated context set
    Full,
}

impl RetrievalMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Partial => "partial",
            Self::Full => "full",
        }
    }
}

/// Outcome of grading one query's candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub mode: RetrievalMode,
    pub top_score: f32,
    pub results: Vec<ScoredCandidate>,
}

impl RetrievalResult {
    /// False when answer generation must short-circuit with [`NO_ANSWER_MESSAGE`]
    #[must_use]
    pub fn is_answerable(&self) -> bool {
        self.mode != RetrievalMode::None
    }

    /// Context block handed to answer generation: `[chunk_id]\n text` per result
    #[must_use]
    pub fn render_context(&self) -> String {
        self.results
            .iter()
            .map(|c| format!("[{}]\n {}", c.chunk.chunk_id, c.chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[must_use]
    pub fn chunk_ids(&self) -> Vec<&str> {
        self.results.iter().map(ScoredCandidate::chunk_id).collect()
    }
}
