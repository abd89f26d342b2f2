//! Experience repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::experience::{CreateExperienceRequest, Experience, UpdateExperienceRequest};

const EXPERIENCE_COLUMNS: &str = "id, company, \"position\", location, start_date, end_date, \
     is_current, description, achievements, technologies, sort_order, created_at, updated_at";

/// Experience repository
#[derive(Clone)]
pub struct ExperienceRepository {
    pool: PgPool,
}

impl ExperienceRepository {
    /// Create a new experience repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an experience entry
    pub async fn create(&self, data: &CreateExperienceRequest) -> Result<Experience> {
        info!("Creating experience entry: {}", data.company);

        let experience = sqlx::query_as::<_, Experience>(&format!(
            r#"
            INSERT INTO experiences
                (company, "position", location, start_date, end_date, is_current,
                 description, achievements, technologies, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        ))
        .bind(&data.company)
        .bind(&data.position)
        .bind(&data.location)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.is_current.unwrap_or(false))
        .bind(&data.description)
        .bind(data.achievements.clone().unwrap_or_default())
        .bind(data.technologies.clone().unwrap_or_default())
        .bind(data.order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(experience)
    }

    /// All experience entries, current first, then most recent
    pub async fn list(&self) -> Result<Vec<Experience>> {
        let experiences = sqlx::query_as::<_, Experience>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences \
             ORDER BY is_current DESC, start_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    /// Find an experience entry by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Experience>> {
        let experience = sqlx::query_as::<_, Experience>(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(experience)
    }

    /// Update an experience entry; absent fields are left untouched
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateExperienceRequest,
    ) -> Result<Option<Experience>> {
        let experience = sqlx::query_as::<_, Experience>(&format!(
            r#"
            UPDATE experiences SET
                company = COALESCE($2, company),
                "position" = COALESCE($3, "position"),
                location = COALESCE($4, location),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_current = COALESCE($7, is_current),
                description = COALESCE($8, description),
                achievements = COALESCE($9, achievements),
                technologies = COALESCE($10, technologies),
                sort_order = COALESCE($11, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EXPERIENCE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.company)
        .bind(&data.position)
        .bind(&data.location)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.is_current)
        .bind(&data.description)
        .bind(&data.achievements)
        .bind(&data.technologies)
        .bind(data.order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(experience)
    }

    /// Hard-delete an experience entry; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
