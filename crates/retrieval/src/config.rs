use serde::{Deserialize, Serialize};

/// Thresholds and bounds for grading a candidate list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Top score at or above which the query counts as directly answerable
    pub primary_threshold: f32,

    /// Top score below which nothing relevant exists; also the bar for
    /// broad inclusion in a full context set
    pub secondary_threshold: f32,

    /// Upper bound on the context set in full mode
    pub max_context_chunks: usize,

    /// Raw candidates returned in none/partial mode
    pub top_k: usize,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            primary_threshold: 0.65,
            secondary_threshold: 0.30,
            max_context_chunks: 4,
            top_k: 5,
        }
    }
}

impl GraderConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.primary_threshold.is_finite() || !self.secondary_threshold.is_finite() {
            return Err(format!(
                "thresholds must be finite (primary={}, secondary={})",
                self.primary_threshold, self.secondary_threshold
            ));
        }

        if self.secondary_threshold >= self.primary_threshold {
            return Err(format!(
                "secondary_threshold ({}) must be below primary_threshold ({})",
                self.secondary_threshold, self.primary_threshold
            ));
        }

        if self.max_context_chunks == 0 {
            return Err("max_context_chunks must be > 0".to_string());
        }

        if self.top_k == 0 {
            return Err("top_k must be > 0".to_string());
        }

        Ok(())
    }
}
