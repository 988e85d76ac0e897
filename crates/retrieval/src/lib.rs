//! Retrieval grading for document question answering.
//!
//! Takes the descending-similarity candidates of one query and decides whether the
//! corpus can answer it (`none` / `partial` / `full`). In full mode the context set
//! is widened with chunks from the best match's own top-level section.

mod config;
mod error;
mod grader;
mod section_key;
mod types;

pub use config::GraderConfig;
pub use error::{Result, RetrievalError};
pub use grader::RetrievalGrader;
pub use section_key::section_key;
pub use types::{RetrievalMode, RetrievalResult, ScoredCandidate, NO_ANSWER_MESSAGE};
