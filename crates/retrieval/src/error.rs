use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrievalError>;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Empty candidate list")]
    EmptyCandidates,

    #[error("Candidate {index} has a non-numeric similarity score ({score})")]
    InvalidScore { index: usize, score: f32 },

    #[error("Invalid grader configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl RetrievalError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// The caller broke a precondition of a single grading call
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyCandidates | Self::InvalidScore { .. })
    }

    /// The grader can not be built with these thresholds
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}
