//! # notem-db
//!
//! PostgreSQL database layer for notem.
//!
//! This crate provides:
//! - Connection pool management
//! - The note repository, including the keyword/phrase retrieval queries and
//!   the enrichment write-back
//! - The append-only chat history repository
//!
//! ## Example
//!
//! ```rust,ignore
//! use notem_db::Database;
//! use notem_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/notem").await?;
//!
//!     let note = db.notes.insert(CreateNoteRequest {
//!         user_id: uuid::Uuid::new_v4(),
//!         collection_id: None,
//!         title: "Trip to Japan".to_string(),
//!         content: "Kyoto temples in autumn.".to_string(),
//!         tags: vec![],
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod chats;
pub mod notes;
pub mod pool;

// Re-export core types
pub use notem_core::*;

pub use chats::PgChatRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Escape every character that is meta in a `SIMILAR TO` pattern.
///
/// Applied to each keyword before it is joined into the alternation
/// pattern, so no caller-supplied text reaches the planner as pattern
/// syntax.
pub fn escape_similar_to(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '\\' | '%' | '_' | '|' | '*' | '+' | '?' | '{' | '}' | '(' | ')' | '[' | ']'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for storage, retrieval, and enrichment write-back.
    pub notes: PgNoteRepository,
    /// Append-only chat history repository.
    pub chats: PgChatRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            chats: PgChatRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            notes: PgNoteRepository::new(self.pool.clone()),
            chats: PgChatRepository::new(self.pool.clone()),
        }
    }
}
