//! Contact message repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::contact::{ContactFilter, ContactMessage, ContactStats, CreateContactRequest};

const MESSAGE_COLUMNS: &str =
    "id, name, email, subject, message, is_read, created_at, updated_at";

/// Contact message repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store an incoming message
    pub async fn create(&self, data: &CreateContactRequest) -> Result<ContactMessage> {
        info!("Storing contact message from: {}", data.email);

        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.subject)
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// List messages, newest first, optionally filtered by read state
    pub async fn list(&self, filter: &ContactFilter) -> Result<(Vec<ContactMessage>, i64)> {
        let offset = (filter.page - 1) * filter.limit;

        let page_sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages \
             WHERE ($1::boolean IS NULL OR is_read = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let page_query = sqlx::query_as::<_, ContactMessage>(&page_sql)
        .bind(filter.is_read)
        .bind(filter.limit)
        .bind(offset)
        .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE ($1::boolean IS NULL OR is_read = $1)",
        )
        .bind(filter.is_read)
        .fetch_one(&self.pool);

        let (messages, total) = tokio::try_join!(page_query, count_query)?;

        Ok((messages, total))
    }

    /// Find a message by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM contact_messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    /// Mark a message as read
    pub async fn mark_as_read(&self, id: i64) -> Result<Option<ContactMessage>> {
        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            "UPDATE contact_messages SET is_read = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    /// Hard-delete a message; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Message counts for the dashboard
    pub async fn stats(&self) -> Result<ContactStats> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool);
        let unread = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE",
        )
        .fetch_one(&self.pool);

        let (total, unread) = tokio::try_join!(total, unread)?;

        Ok(ContactStats {
            total,
            unread,
            read: total - unread,
        })
    }
}
