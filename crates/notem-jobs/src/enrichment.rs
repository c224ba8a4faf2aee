//! The enrichment pipeline: prompt, decode, write back.
//!
//! [`MetadataEnricher::enrich`] is the full pipeline for one note and
//! returns a Result for tests and logging. [`EnrichmentPipeline::dispatch`]
//! is the fire-and-forget entry point the creation flow uses: it spawns the
//! work on the runtime and absorbs every failure at the task boundary.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use notem_core::{GenerationBackend, NoteRepository, Result};

use crate::metadata::{metadata_prompt, parse_metadata};

/// Derives and stores summary/tags for a single note.
pub struct MetadataEnricher {
    notes: Arc<dyn NoteRepository>,
    backend: Arc<dyn GenerationBackend>,
}

impl MetadataEnricher {
    /// Create a new enricher over the given repository and backend.
    pub fn new(notes: Arc<dyn NoteRepository>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { notes, backend }
    }

    /// Run the enrichment pipeline for one note.
    ///
    /// On success, summary and tags are written together, scoped to
    /// (note_id, user_id). Any error short-circuits before the write; a
    /// partial write is impossible by construction.
    pub async fn enrich(
        &self,
        note_id: Uuid,
        title: &str,
        content: &str,
        user_id: Uuid,
    ) -> Result<()> {
        let start = Instant::now();
        let prompt = metadata_prompt(title, content);

        debug!(
            subsystem = "jobs",
            component = "enricher",
            op = "enrich",
            note_id = %note_id,
            prompt_len = prompt.len(),
            "Requesting note metadata"
        );

        let raw = self.backend.generate(&prompt).await?;
        let metadata = parse_metadata(&raw)?;

        self.notes
            .update_metadata(note_id, user_id, &metadata.summary, &metadata.tags)
            .await?;

        info!(
            subsystem = "jobs",
            component = "enricher",
            op = "enrich",
            note_id = %note_id,
            tag_count = metadata.tags.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Note metadata updated"
        );
        Ok(())
    }
}

/// Fire-and-forget front of the enrichment pipeline.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    enricher: Arc<MetadataEnricher>,
}

impl EnrichmentPipeline {
    /// Create a new pipeline over the given repository and backend.
    pub fn new(notes: Arc<dyn NoteRepository>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            enricher: Arc::new(MetadataEnricher::new(notes, backend)),
        }
    }

    /// Enrich a note in the background.
    ///
    /// Returns immediately; the caller must not depend on the outcome. The
    /// spawned task catches every failure, logs it, and exits — errors never
    /// propagate to the creation path and nothing is retried. The returned
    /// handle exists for tests and shutdown sequencing and may be dropped.
    pub fn dispatch(
        &self,
        note_id: Uuid,
        title: String,
        content: String,
        user_id: Uuid,
    ) -> JoinHandle<()> {
        let enricher = Arc::clone(&self.enricher);
        tokio::spawn(async move {
            if let Err(e) = enricher.enrich(note_id, &title, &content, user_id).await {
                warn!(
                    subsystem = "jobs",
                    component = "enricher",
                    op = "dispatch",
                    note_id = %note_id,
                    error = %e,
                    "Enrichment failed; note left unenriched"
                );
            }
        })
    }
}
