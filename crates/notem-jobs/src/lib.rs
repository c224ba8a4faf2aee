//! # notem-jobs
//!
//! Background metadata enrichment for notem.
//!
//! Every newly created note gets a model-derived summary and tag set,
//! produced out-of-band from the request that created it:
//!
//! - The creation path calls [`EnrichmentPipeline::dispatch`] and moves on;
//!   the spawned task is never awaited by the caller.
//! - The task prompts the generation backend, decodes its output with a
//!   strict decode-then-validate step, and writes summary and tags back in
//!   one statement.
//! - Any failure is logged at the task boundary and absorbed. Nothing is
//!   retried and nothing reaches the creation path; a failed enrichment
//!   leaves the note unenriched until a manual re-run.
//!
//! ## Example
//!
//! ```ignore
//! use notem_jobs::EnrichmentPipeline;
//!
//! let pipeline = EnrichmentPipeline::new(notes, backend);
//! let note = note_service.create(req).await?;
//! pipeline.dispatch(note.id, note.title, note.content, note.user_id);
//! // creation already returned; enrichment lands whenever it lands
//! ```

pub mod enrichment;
pub mod metadata;

// Re-export core types
pub use notem_core::*;

pub use enrichment::{EnrichmentPipeline, MetadataEnricher};
pub use metadata::{metadata_prompt, parse_metadata, NoteMetadata};
