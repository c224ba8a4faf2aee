//! In-memory repository fakes for service tests.
//!
//! These mirror the PostgreSQL repositories' observable behavior: user
//! scoping, case-insensitive substring matching, recency ordering, and the
//! retrieval limit. Later-seeded notes are more recent.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use notem_core::{
    ChatRecord, ChatRepository, CreateNoteRequest, Error, Note, NoteListFilter, NoteRepository,
    Result,
};

pub struct InMemoryNotes {
    rows: Mutex<Vec<Note>>,
    clock: AtomicI64,
    searches: Mutex<Vec<String>>,
}

impl InMemoryNotes {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock: AtomicI64::new(0),
            searches: Mutex::new(Vec::new()),
        }
    }

    /// Insert a note owned by `user_id`; each call is one second newer than
    /// the previous one.
    pub fn seed(&self, user_id: Uuid, title: &str, content: &str) -> Note {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let at = Utc::now() + Duration::seconds(tick);
        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            collection_id: None,
            title: title.to_string(),
            content: content.to_string(),
            summary: None,
            tags: Vec::new(),
            created_at: at,
            updated_at: at,
        };
        self.rows.lock().unwrap().push(note.clone());
        note
    }

    pub fn get(&self, id: Uuid) -> Option<Note> {
        self.rows.lock().unwrap().iter().find(|n| n.id == id).cloned()
    }

    /// Which retrieval modes ran, in order ("keywords" / "phrase").
    pub fn search_log(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }

    fn matching(&self, user_id: Uuid, limit: i64, pred: impl Fn(&Note) -> bool) -> Vec<Note> {
        let mut hits: Vec<Note> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && pred(n))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        hits.truncate(limit as usize);
        hits
    }
}

#[async_trait]
impl NoteRepository for InMemoryNotes {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let mut note = self.seed(req.user_id, &req.title, &req.content);
        note.collection_id = req.collection_id;
        note.tags = req.tags.iter().map(|t| t.to_lowercase()).collect();
        let mut rows = self.rows.lock().unwrap();
        if let Some(stored) = rows.iter_mut().find(|n| n.id == note.id) {
            *stored = note.clone();
        }
        Ok(note)
    }

    async fn fetch(&self, id: Uuid, user_id: Uuid) -> Result<Note> {
        self.get(id)
            .filter(|n| n.user_id == user_id)
            .ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, user_id: Uuid, filter: NoteListFilter) -> Result<Vec<Note>> {
        Ok(self.matching(user_id, filter.limit.unwrap_or(50), |n| {
            filter
                .collection_id
                .map_or(true, |c| n.collection_id == Some(c))
                && filter.tag.as_ref().map_or(true, |t| n.tags.contains(t))
        }))
    }

    async fn search_keywords(
        &self,
        user_id: Uuid,
        keywords: &[String],
        limit: i64,
    ) -> Result<Vec<Note>> {
        self.searches.lock().unwrap().push("keywords".to_string());
        let keywords = keywords.to_vec();
        Ok(self.matching(user_id, limit, move |n| {
            let haystack = format!(
                "{} {} {} {}",
                n.title,
                n.summary.as_deref().unwrap_or(""),
                n.content,
                n.tags.join(" ")
            )
            .to_lowercase();
            keywords.iter().any(|k| haystack.contains(k.as_str()))
        }))
    }

    async fn search_phrase(&self, user_id: Uuid, phrase: &str, limit: i64) -> Result<Vec<Note>> {
        self.searches.lock().unwrap().push("phrase".to_string());
        let phrase = phrase.to_lowercase();
        Ok(self.matching(user_id, limit, move |n| {
            n.title.to_lowercase().contains(&phrase)
                || n.summary
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&phrase))
                || n.content.to_lowercase().contains(&phrase)
        }))
    }

    async fn update_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let note = rows
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(Error::NoteNotFound(id))?;
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = Utc::now();
        Ok(())
    }

    async fn update_metadata(
        &self,
        id: Uuid,
        user_id: Uuid,
        summary: &str,
        tags: &[String],
    ) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let note = rows
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(Error::NoteNotFound(id))?;
        note.summary = Some(summary.to_string());
        note.tags = tags.iter().map(|t| t.to_lowercase()).collect();
        note.updated_at = Utc::now();
        Ok(())
    }
}

pub struct InMemoryChats {
    records: Mutex<Vec<ChatRecord>>,
}

impl InMemoryChats {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<ChatRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChats {
    async fn append(
        &self,
        user_id: Uuid,
        question: &str,
        answer: &str,
        sources: &[Uuid],
    ) -> Result<Uuid> {
        let record = ChatRecord {
            id: Uuid::new_v4(),
            user_id,
            question: question.to_string(),
            answer: answer.to_string(),
            sources: sources.to_vec(),
            created_at: Utc::now(),
        };
        let id = record.id;
        self.records.lock().unwrap().push(record);
        Ok(id)
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<ChatRecord>> {
        let mut records: Vec<ChatRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.reverse();
        records.truncate(limit as usize);
        Ok(records)
    }
}

/// Chat repository whose append always fails; recording failures must not
/// surface as answer failures.
pub struct FailingChats;

#[async_trait]
impl ChatRepository for FailingChats {
    async fn append(&self, _: Uuid, _: &str, _: &str, _: &[Uuid]) -> Result<Uuid> {
        Err(Error::Internal("chat storage unavailable".to_string()))
    }

    async fn list_recent(&self, _: Uuid, _: i64) -> Result<Vec<ChatRecord>> {
        Err(Error::Internal("chat storage unavailable".to_string()))
    }
}
