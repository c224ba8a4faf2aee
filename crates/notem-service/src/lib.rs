//! # notem-service
//!
//! The service layer the request layer calls into:
//!
//! - [`ChatService`] answers a user's question strictly from their own
//!   notes: keyword extraction, candidate retrieval, overlap ranking,
//!   bounded context assembly, a grounding-contracted generation call, and
//!   append-only interaction recording.
//! - [`NoteService`] owns the note-creation flow, including the
//!   fire-and-forget hand-off to the enrichment pipeline, plus listing,
//!   fetching, and user edits.
//!
//! Both services hold their collaborators as trait objects so tests can
//! substitute in-memory repositories and a mock generation backend.

pub mod chat;
pub mod notes;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types
pub use notem_core::*;

pub use chat::{answer_prompt, ChatService, NO_GROUNDING_ANSWER};
pub use notes::NoteService;
