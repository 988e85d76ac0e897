use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while turning a document into chunks
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The document text was empty or whitespace only
    #[error("Empty content provided")]
    EmptyContent,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// The caller handed over input that can never be chunked
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyContent)
    }

    /// The chunker was built with budgets that contradict each other
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_helpers_match_variants() {
        assert!(ChunkerError::EmptyContent.is_invalid_input());
        assert!(!ChunkerError::EmptyContent.is_configuration());

        let err = ChunkerError::invalid_config("max_chars must be > 0");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_chars must be > 0"
        );
    }
}
