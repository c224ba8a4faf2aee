//! Core data models for notem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's note.
///
/// `summary` and `tags` start empty and are filled in together by the
/// metadata-enrichment pipeline. The pipeline writes both fields in a single
/// statement, so a note is either unenriched (no summary, no tags beyond any
/// the user supplied at creation) or fully enriched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Owning user. Every read and write of this note is scoped by it.
    pub user_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Lowercase tag set. Unordered; stored sorted for determinism.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether the enrichment pipeline has completed for this note.
    pub fn is_enriched(&self) -> bool {
        self.summary.is_some() && !self.tags.is_empty()
    }
}

/// One recorded question/answer interaction. Immutable once created;
/// chat history is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    /// Cited note ids, in context order.
    pub sources: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A cited source in an answer response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: Uuid,
    pub title: String,
}

/// The result of one answer cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

impl ChatAnswer {
    /// The fixed response produced without consulting the model when no
    /// grounding material exists.
    pub fn no_grounding(fallback: &str) -> Self {
        Self {
            answer: fallback.to_string(),
            sources: Vec::new(),
        }
    }
}
