//! Note repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use notem_core::{
    defaults, CreateNoteRequest, Error, Note, NoteListFilter, NoteRepository, Result,
};

use crate::{escape_like, escape_similar_to};

const NOTE_COLUMNS: &str =
    "id, user_id, collection_id, title, content, summary, tags, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Normalize a tag list: lowercase, trim, drop empties, dedup, sort.
    fn normalize_tags(tags: &[String]) -> Vec<String> {
        let mut normalized: Vec<String> = tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        normalized.sort();
        normalized.dedup();
        normalized
    }
}

fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        user_id: row.get("user_id"),
        collection_id: row.get("collection_id"),
        title: row.get("title"),
        content: row.get("content"),
        summary: row.get("summary"),
        tags: row.get("tags"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let tags = Self::normalize_tags(&req.tags);
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO notes (id, user_id, collection_id, title, content, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(req.user_id)
        .bind(req.collection_id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&tags)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_note(row))
    }

    async fn fetch(&self, id: Uuid, user_id: Uuid) -> Result<Note> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))
    }

    async fn list(&self, user_id: Uuid, filter: NoteListFilter) -> Result<Vec<Note>> {
        let mut query = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1 ");
        let mut param_idx = 2;

        if filter.collection_id.is_some() {
            query.push_str(&format!("AND collection_id = ${param_idx} "));
            param_idx += 1;
        }
        if filter.tag.is_some() {
            // Postgres array containment check
            query.push_str(&format!("AND ${param_idx} = ANY(tags) "));
            param_idx += 1;
        }
        query.push_str(&format!("ORDER BY created_at DESC LIMIT ${param_idx}"));

        let mut q = sqlx::query(&query).bind(user_id);
        if let Some(collection_id) = filter.collection_id {
            q = q.bind(collection_id);
        }
        if let Some(tag) = &filter.tag {
            q = q.bind(tag.to_lowercase());
        }

        let rows = q
            .bind(filter.limit.unwrap_or(defaults::PAGE_LIMIT))
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn search_keywords(
        &self,
        user_id: Uuid,
        keywords: &[String],
        limit: i64,
    ) -> Result<Vec<Note>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        // One alternation pattern matching ANY term: '%(k1|k2|...)%'.
        // Terms arrive lowercase from the extractor; the compared columns are
        // lowered to keep the match case-insensitive. Each term is escaped so
        // no SIMILAR TO metacharacter survives into the pattern.
        let terms: Vec<String> = keywords.iter().map(|k| escape_similar_to(k)).collect();
        let pattern = format!("%({})%", terms.join("|"));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            WHERE user_id = $1
              AND (
                  lower(title) SIMILAR TO $2 OR
                  lower(coalesce(summary, '')) SIMILAR TO $2 OR
                  lower(content) SIMILAR TO $2 OR
                  lower(array_to_string(tags, ' ')) SIMILAR TO $2
              )
            ORDER BY created_at DESC
            LIMIT $3
            "#
        ))
        .bind(user_id)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "search_keywords",
            keyword_count = keywords.len(),
            result_count = rows.len(),
            "Keyword retrieval complete"
        );

        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn search_phrase(&self, user_id: Uuid, phrase: &str, limit: i64) -> Result<Vec<Note>> {
        let pattern = format!("%{}%", escape_like(phrase));

        let rows = sqlx::query(&format!(
            r#"
            SELECT {NOTE_COLUMNS}
            FROM notes
            WHERE user_id = $1
              AND (title ILIKE $2 OR summary ILIKE $2 OR content ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#
        ))
        .bind(user_id)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "notes",
            op = "search_phrase",
            result_count = rows.len(),
            "Phrase retrieval complete"
        );

        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn update_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET title = $1, content = $2, updated_at = now()
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn update_metadata(
        &self,
        id: Uuid,
        user_id: Uuid,
        summary: &str,
        tags: &[String],
    ) -> Result<()> {
        let tags = Self::normalize_tags(tags);

        // Summary and tags land in a single statement; the enrichment
        // invariant (never one without the other) holds per-row.
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET summary = $1, tags = $2, updated_at = now()
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(summary)
        .bind(&tags)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags_lowercases_and_sorts() {
        let tags = vec!["Travel".to_string(), "JAPAN".to_string()];
        assert_eq!(
            PgNoteRepository::normalize_tags(&tags),
            vec!["japan".to_string(), "travel".to_string()]
        );
    }

    #[test]
    fn test_normalize_tags_dedups_and_drops_empty() {
        let tags = vec![
            "food".to_string(),
            " food ".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(
            PgNoteRepository::normalize_tags(&tags),
            vec!["food".to_string()]
        );
    }

    #[test]
    fn test_keyword_pattern_shape() {
        let keywords = vec!["kyoto".to_string(), "temples".to_string()];
        let terms: Vec<String> = keywords.iter().map(|k| escape_similar_to(k)).collect();
        let pattern = format!("%({})%", terms.join("|"));
        assert_eq!(pattern, "%(kyoto|temples)%");
    }
}
