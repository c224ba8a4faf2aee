//! Repository and inference backend traits.
//!
//! Storage and the generative model are collaborators consumed through these
//! seams; PostgreSQL implementations live in notem-db, the Ollama backend in
//! notem-inference. Keeping the traits here lets the service and jobs crates
//! run against substitutes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ChatRecord, Note};

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub user_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    /// Optional user-supplied tags; normalized to lowercase on insert.
    pub tags: Vec<String>,
}

/// Filters for listing a user's notes.
#[derive(Debug, Clone, Default)]
pub struct NoteListFilter {
    pub collection_id: Option<Uuid>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note storage, retrieval, and the enrichment write-back.
///
/// Every operation is scoped to one owning user; implementations must never
/// return or mutate another user's rows.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return the stored row.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a note by id, scoped to its owner.
    async fn fetch(&self, id: Uuid, user_id: Uuid) -> Result<Note>;

    /// List a user's notes, newest first.
    async fn list(&self, user_id: Uuid, filter: NoteListFilter) -> Result<Vec<Note>>;

    /// Broad keyword retrieval: notes where any of `keywords` appears in the
    /// title, summary, content, or tag list (case-insensitive substring).
    /// High recall by design; precision comes from ranking afterwards.
    /// Newest first, bounded by `limit`. Empty result is not an error.
    async fn search_keywords(
        &self,
        user_id: Uuid,
        keywords: &[String],
        limit: i64,
    ) -> Result<Vec<Note>>;

    /// Fallback retrieval for questions that yield no keywords: notes whose
    /// title, summary, or content contains `phrase` as a case-insensitive
    /// substring. Newest first, bounded by `limit`.
    async fn search_phrase(&self, user_id: Uuid, phrase: &str, limit: i64) -> Result<Vec<Note>>;

    /// Update title and content (user edit path). Uncoordinated with the
    /// enrichment write by design; last writer wins per statement.
    async fn update_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<()>;

    /// Enrichment write-back: set summary and tags together in one statement,
    /// scoped to (id, user_id). Never writes one field without the other.
    async fn update_metadata(
        &self,
        id: Uuid,
        user_id: Uuid,
        summary: &str,
        tags: &[String],
    ) -> Result<()>;
}

// =============================================================================
// CHAT REPOSITORY
// =============================================================================

/// Append-only repository for question/answer history.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Append one immutable chat record; returns its id.
    async fn append(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        sources: &[Uuid],
    ) -> Result<Uuid>;

    /// List a user's chat history, newest first.
    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ChatRecord>>;
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Backend for text generation (LLM).
///
/// One configured backend is constructed at startup and injected into the
/// components that need it; it is treated as stateless per call.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
