//! # notem-search
//!
//! Lexical retrieval algorithms for notem.
//!
//! This crate provides the pure, storage-free half of the question-answering
//! pipeline:
//! - Keyword extraction from free-text questions
//! - Relevance ranking of retrieved candidates by keyword overlap
//! - Context assembly for the generation prompt
//!
//! All functions here are deterministic and perform no I/O; the storage
//! lookup they drive lives in notem-db.

pub mod context;
pub mod keywords;
pub mod ranking;

// Re-export core types
pub use notem_core::*;

pub use context::{assemble_context, snippet, CONTEXT_SEPARATOR, NO_SUMMARY_MARKER};
pub use keywords::{extract_keywords, is_stop_word, STOP_WORDS};
pub use ranking::{keyword_overlap, rank_candidates};
