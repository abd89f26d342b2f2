//! Education repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::education::{CreateEducationRequest, Education, UpdateEducationRequest};

const EDUCATION_COLUMNS: &str = "id, institution, degree, field, start_date, end_date, \
     is_current, description, achievements, grade, sort_order, created_at, updated_at";

/// Education repository
#[derive(Clone)]
pub struct EducationRepository {
    pool: PgPool,
}

impl EducationRepository {
    /// Create a new education repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an education entry
    pub async fn create(&self, data: &CreateEducationRequest) -> Result<Education> {
        info!("Creating education entry: {}", data.institution);

        let education = sqlx::query_as::<_, Education>(&format!(
            r#"
            INSERT INTO educations
                (institution, degree, field, start_date, end_date, is_current,
                 description, achievements, grade, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {EDUCATION_COLUMNS}
            "#
        ))
        .bind(&data.institution)
        .bind(&data.degree)
        .bind(&data.field)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.is_current.unwrap_or(false))
        .bind(&data.description)
        .bind(data.achievements.clone().unwrap_or_default())
        .bind(&data.grade)
        .bind(data.order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(education)
    }

    /// All education entries, current first, then most recent
    pub async fn list(&self) -> Result<Vec<Education>> {
        let educations = sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM educations \
             ORDER BY is_current DESC, start_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(educations)
    }

    /// Find an education entry by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Education>> {
        let education = sqlx::query_as::<_, Education>(&format!(
            "SELECT {EDUCATION_COLUMNS} FROM educations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(education)
    }

    /// Update an education entry; absent fields are left untouched
    pub async fn update(
        &self,
        id: i64,
        data: &UpdateEducationRequest,
    ) -> Result<Option<Education>> {
        let education = sqlx::query_as::<_, Education>(&format!(
            r#"
            UPDATE educations SET
                institution = COALESCE($2, institution),
                degree = COALESCE($3, degree),
                field = COALESCE($4, field),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                is_current = COALESCE($7, is_current),
                description = COALESCE($8, description),
                achievements = COALESCE($9, achievements),
                grade = COALESCE($10, grade),
                sort_order = COALESCE($11, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EDUCATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.institution)
        .bind(&data.degree)
        .bind(&data.field)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.is_current)
        .bind(&data.description)
        .bind(&data.achievements)
        .bind(&data.grade)
        .bind(data.order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(education)
    }

    /// Hard-delete an education entry; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM educations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
