//! Grounded question answering over a user's notes.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use notem_core::defaults::{
    CHAT_HISTORY_LIMIT, CONTEXT_NOTES_MAX, QUESTION_MAX_CHARS, RETRIEVAL_LIMIT,
};
use notem_core::{
    ChatAnswer, ChatRecord, ChatRepository, Error, GenerationBackend, NoteRepository, Result,
    SourceRef,
};
use notem_db::{Database, PgChatRepository, PgNoteRepository};
use notem_search::{assemble_context, extract_keywords, rank_candidates};

/// The exact sentence returned when the notes cannot ground an answer.
///
/// The generation prompt instructs the model to use this same sentence, and
/// the service returns it directly (without a model call) when retrieval
/// produces no candidates. The two cases are indistinguishable to the user
/// by design; neither is an error.
pub const NO_GROUNDING_ANSWER: &str =
    "I don't have enough information in your notes to answer this.";

/// Build the grounding-contracted prompt for one question.
///
/// The contract is enforced by instruction only: answer from the supplied
/// notes, fall back to the fixed sentence, no fabrication, optional title
/// citations, stay concise. The service never verifies the model's output
/// against the notes.
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a helpful assistant answering a user's question based strictly on their notes.\n\
         \n\
         USER QUESTION: \"{question}\"\n\
         \n\
         AVAILABLE NOTES:\n\
         {context}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Answer the question using ONLY the provided notes.\n\
         2. If the answer is not in the notes, strictly say \"{NO_GROUNDING_ANSWER}\"\n\
         3. Do not make up facts.\n\
         4. Cite sources by referring to the Title if useful.\n\
         5. Keep the answer concise and conversational."
    )
}

/// Answers questions from a user's notes and records each interaction.
pub struct ChatService {
    notes: Arc<dyn NoteRepository>,
    chats: Arc<dyn ChatRepository>,
    backend: Arc<dyn GenerationBackend>,
}

impl ChatService {
    /// Create a new ChatService over explicit collaborators.
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        chats: Arc<dyn ChatRepository>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self {
            notes,
            chats,
            backend,
        }
    }

    /// Create a ChatService backed by the PostgreSQL repositories.
    pub fn from_database(db: &Database, backend: Arc<dyn GenerationBackend>) -> Self {
        Self::new(
            Arc::new(PgNoteRepository::new(db.pool().clone())),
            Arc::new(PgChatRepository::new(db.pool().clone())),
            backend,
        )
    }

    /// Answer `question` strictly from the user's notes.
    ///
    /// Retrieval and ranking run first; with no grounding material the fixed
    /// fallback sentence comes back immediately and the model is never
    /// consulted. A backend failure propagates to the caller; a failure to
    /// record the interaction does not (the answer is already computed and
    /// is returned regardless).
    pub async fn answer(&self, user_id: Uuid, question: &str) -> Result<ChatAnswer> {
        if question.is_empty() {
            return Err(Error::InvalidInput("question must not be empty".to_string()));
        }
        if question.chars().count() > QUESTION_MAX_CHARS {
            return Err(Error::InvalidInput(format!(
                "question exceeds {} characters",
                QUESTION_MAX_CHARS
            )));
        }

        let start = Instant::now();
        let keywords = extract_keywords(question);

        let candidates = if keywords.is_empty() {
            // No usable terms (e.g. "??"); fall back to a broad substring
            // match on the whole question.
            self.notes
                .search_phrase(user_id, question, RETRIEVAL_LIMIT)
                .await?
        } else {
            self.notes
                .search_keywords(user_id, &keywords, RETRIEVAL_LIMIT)
                .await?
        };

        debug!(
            subsystem = "chat",
            component = "retriever",
            op = "answer",
            user_id = %user_id,
            keyword_count = keywords.len(),
            result_count = candidates.len(),
            "Candidate retrieval complete"
        );

        let top = rank_candidates(candidates, &keywords, CONTEXT_NOTES_MAX);

        if top.is_empty() {
            info!(
                subsystem = "chat",
                component = "ranker",
                op = "answer",
                user_id = %user_id,
                "No grounding material; returning fixed fallback"
            );
            return Ok(ChatAnswer::no_grounding(NO_GROUNDING_ANSWER));
        }

        let context = assemble_context(&top);
        let prompt = answer_prompt(question, &context);
        let answer = self.backend.generate(&prompt).await?;

        let source_ids: Vec<Uuid> = top.iter().map(|n| n.id).collect();
        if let Err(e) = self
            .chats
            .append(user_id, question, &answer, &source_ids)
            .await
        {
            // The answer is already computed; recording failure stays ours
            warn!(
                subsystem = "chat",
                component = "recorder",
                op = "answer",
                user_id = %user_id,
                error = %e,
                "Failed to record interaction; returning answer anyway"
            );
        }

        info!(
            subsystem = "chat",
            op = "answer",
            user_id = %user_id,
            result_count = top.len(),
            response_len = answer.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Answer generated"
        );

        Ok(ChatAnswer {
            answer,
            sources: top
                .into_iter()
                .map(|n| SourceRef {
                    id: n.id,
                    title: n.title,
                })
                .collect(),
        })
    }

    /// List the user's chat history, newest first.
    pub async fn history(&self, user_id: Uuid, limit: Option<i64>) -> Result<Vec<ChatRecord>> {
        self.chats
            .list_recent(user_id, limit.unwrap_or(CHAT_HISTORY_LIMIT))
            .await
    }
}
