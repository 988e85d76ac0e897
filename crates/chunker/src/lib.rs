//! # DocQA Chunker
//!
//! Structure-aware chunking of Markdown documents for vector search.
//!
//! ## Philosophy
//!
//! Chunks should follow the document's own structure:
//! - Split along header boundaries before falling back to line offsets
//! - Never cut a Markdown table in half
//! - Keep table-of-contents pages out of the index
//! - Give every chunk an id that is stable across re-runs and sorts in document order
//!
//! ## Architecture
//!
//! ```text
//! Markdown text
//!     │
//!     ├──> SectionSplitter → Section[] (level_1..level_4, order_index)
//!     │
//!     ├──> TocFilter → drop table-of-contents sections
//!     │
//!     ├──> group by level_1
//!     │
//!     ├──> BoundedChunker (per group)
//!     │    ├─> fits max_chars? emit
//!     │    ├─> split by level_2 → level_3 → level_4
//!     │    └─> table-safe line splitter
//!     │
//!     └──> ChunkIdentityAssigner → Chunk[] (doc__section__chunk_NNN)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use docqa_chunker::Chunker;
//!
//! let markdown = "# Fees\nTuition is payable per semester.\n";
//! let chunked = Chunker::default().chunk_document(markdown, "Handbook").unwrap();
//! assert_eq!(chunked.chunks[0].chunk_id, "handbook__fees__chunk_000");
//! ```

mod batch;
mod bounded;
mod chunker;
mod config;
mod error;
mod fingerprint;
mod identity;
mod inspect;
mod sections;
mod toc;
mod types;

pub use batch::{estimate_tokens, plan_embedding_batches, DEFAULT_BATCH_TOKENS};
pub use bounded::{split_table_safe, BoundedChunker};
pub use chunker::Chunker;
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use fingerprint::fingerprint;
pub use identity::{format_chunk_id, slugify, ChunkIdentityAssigner, ID_SEPARATOR};
pub use inspect::{InspectionSignals, SectionInspection, SectionKind};
pub use sections::SectionSplitter;
pub use toc::{
    contains_markdown_table, count_outline_refs, is_toc_candidate, RuleOutcome, TocFilter,
    TocRule, TOC_RULES,
};
pub use types::{
    Chunk, ChunkMetadata, ChunkedDocument, ChunkingReport, HeaderLevel, Section,
    UNKNOWN_SECTION,
};
