use std::collections::HashSet;

use crate::config::GraderConfig;
use crate::error::{Result, RetrievalError};
use crate::section_key::section_key;
use crate::types::{RetrievalMode, RetrievalResult, ScoredCandidate};

/// Turns a similarity-ranked candidate list into a graded retrieval decision
#[derive(Debug, Clone, Copy)]
pub struct RetrievalGrader {
    config: GraderConfig,
}

impl RetrievalGrader {
    /// Create a grader, rejecting thresholds that leave the modes undefined
    pub fn new(config: GraderConfig) -> Result<Self> {
        config.validate().map_err(RetrievalError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &GraderConfig {
        &self.config
    }

    /// Mode for a given top score
    #[must_use]
    pub fn mode_for(&self, top_score: f32) -> RetrievalMode {
        if top_score < self.config.secondary_threshold {
            RetrievalMode::None
        } else if top_score < self.config.primary_threshold {
            RetrievalMode::Partial
        } else {
            RetrievalMode::Full
        }
    }

    /// Grade candidates ordered by descending score.
    ///
    /// The first candidate is taken as the best match. In full mode the context
    /// set holds, in acceptance order, every candidate at or above the secondary
    /// threshold, then siblings from the best match's section regardless of score,
    /// never more than `max_context_chunks` and never the same chunk id twice.
    pub fn grade(&self, candidates: &[ScoredCandidate]) -> Result<RetrievalResult> {
        let top = candidates.first().ok_or(RetrievalError::EmptyCandidates)?;
        if let Some((index, c)) = candidates.iter().enumerate().find(|(_, c)| c.score.is_nan()) {
            return Err(RetrievalError::InvalidScore {
                index,
                score: c.score,
            });
        }

        let top_score = top.score;
        let mode = self.mode_for(top_score);
        log::debug!(
            "Top score {top_score:.3} over {} candidates -> {}",
            candidates.len(),
            mode.as_str()
        );

        let results = match mode {
            RetrievalMode::None | RetrievalMode::Partial => {
                candidates.iter().take(self.config.top_k).cloned().collect()
            }
            RetrievalMode::Full => self.assemble_context(candidates),
        };

        Ok(RetrievalResult {
            mode,
            top_score,
            results,
        })
    }

    fn assemble_context(&self, candidates: &[ScoredCandidate]) -> Vec<ScoredCandidate> {
        let limit = self.config.max_context_chunks;
        let mut accepted: Vec<&ScoredCandidate> = Vec::with_capacity(limit);
        let mut seen: HashSet<&str> = HashSet::new();

        for candidate in candidates {
            if accepted.len() >= limit {
                break;
            }
            if candidate.score >= self.config.secondary_threshold
                && seen.insert(candidate.chunk_id())
            {
                accepted.push(candidate);
            }
        }
        let by_threshold = accepted.len();

        let top_section = section_key(candidates[0].chunk_id());
        for candidate in candidates {
            if accepted.len() >= limit {
                break;
            }
            if candidate.section_key() == top_section && seen.insert(candidate.chunk_id()) {
                accepted.push(candidate);
            }
        }

        log::debug!(
            "Full context: {by_threshold} above threshold, {} section siblings from {top_section}",
            accepted.len() - by_threshold
        );

        accepted.into_iter().cloned().collect()
    }
}
