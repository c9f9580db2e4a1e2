use chrono::{Duration, Utc};
use sqlx::MySqlPool;

use crate::db::models::Snippet;
use crate::error::SnippetboxError;

/// Data-access layer for the `snippets` table.
///
/// Clones share the underlying pool, so one instance can serve every
/// request handler concurrently.
#[derive(Clone)]
pub struct SnippetModel {
    pool: MySqlPool,
}

impl SnippetModel {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Stores a snippet expiring `expires_days` days from now and returns
    /// the id assigned by the database.
    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i64,
    ) -> Result<u64, SnippetboxError> {
        let now = Utc::now();
        let expires = now + Duration::days(expires_days);

        let result = sqlx::query(
            r"
        INSERT INTO snippets (title, content, created, expires)
        VALUES (?, ?, ?, ?)
        ",
        )
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(expires)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id())
    }

    /// A single live snippet by id. Expired rows behave as absent.
    pub async fn get(&self, id: i64) -> Result<Snippet, SnippetboxError> {
        sqlx::query_as::<_, Snippet>(
            r"
        SELECT id, title, content, created, expires
        FROM snippets
        WHERE expires > UTC_TIMESTAMP() AND id = ?
        ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(SnippetboxError::from_query)
    }

    /// Up to the ten most recently created live snippets, newest first.
    pub async fn latest(&self) -> Result<Vec<Snippet>, SnippetboxError> {
        let rows = sqlx::query_as::<_, Snippet>(
            r"
        SELECT id, title, content, created, expires
        FROM snippets
        WHERE expires > UTC_TIMESTAMP()
        ORDER BY id DESC
        LIMIT 10
        ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
