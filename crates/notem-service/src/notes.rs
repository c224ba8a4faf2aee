//! Note creation, listing, and edits.
//!
//! Creation hands the stored note to the enrichment pipeline and returns
//! without waiting; the response to the creating request never depends on
//! enrichment succeeding, failing, or even starting.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use notem_core::{CreateNoteRequest, GenerationBackend, Note, NoteListFilter, NoteRepository, Result};
use notem_db::{Database, PgNoteRepository};
use notem_jobs::EnrichmentPipeline;

/// Note CRUD service wired to the enrichment pipeline.
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
    pipeline: EnrichmentPipeline,
}

impl NoteService {
    /// Create a new NoteService over explicit collaborators.
    pub fn new(notes: Arc<dyn NoteRepository>, pipeline: EnrichmentPipeline) -> Self {
        Self { notes, pipeline }
    }

    /// Create a NoteService backed by the PostgreSQL repository.
    pub fn from_database(db: &Database, backend: Arc<dyn GenerationBackend>) -> Self {
        let notes: Arc<dyn NoteRepository> = Arc::new(PgNoteRepository::new(db.pool().clone()));
        let pipeline = EnrichmentPipeline::new(notes.clone(), backend);
        Self::new(notes, pipeline)
    }

    /// Create a note and dispatch its enrichment in the background.
    ///
    /// The returned note is the row as stored — unenriched. Summary and tags
    /// appear later (or never), observable only by re-reading the note.
    pub async fn create(&self, req: CreateNoteRequest) -> Result<Note> {
        let note = self.notes.insert(req).await?;

        info!(
            subsystem = "notes",
            op = "create",
            note_id = %note.id,
            user_id = %note.user_id,
            "Note created; dispatching enrichment"
        );

        self.pipeline.dispatch(
            note.id,
            note.title.clone(),
            note.content.clone(),
            note.user_id,
        );

        Ok(note)
    }

    /// Fetch one note, scoped to its owner.
    pub async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Note> {
        self.notes.fetch(id, user_id).await
    }

    /// List a user's notes, newest first.
    pub async fn list(&self, user_id: Uuid, filter: NoteListFilter) -> Result<Vec<Note>> {
        self.notes.list(user_id, filter).await
    }

    /// Apply a user edit to title and content.
    ///
    /// Deliberately uncoordinated with any in-flight enrichment of the same
    /// note: the two writers touch disjoint field sets and the last
    /// statement wins. Known consistency gap, accepted.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<()> {
        self.notes.update_content(id, user_id, title, content).await
    }
}
