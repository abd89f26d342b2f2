//! Skill repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tracing::info;

use crate::models::skill::{CreateSkillRequest, Skill, SkillCategory, UpdateSkillRequest};

const SKILL_COLUMNS: &str =
    "id, name, category, level, icon, color, sort_order, created_at, updated_at";

/// Skill repository
#[derive(Clone)]
pub struct SkillRepository {
    pool: PgPool,
}

impl SkillRepository {
    /// Create a new skill repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a skill
    pub async fn create(&self, data: &CreateSkillRequest) -> Result<Skill> {
        info!("Creating skill: {}", data.name);

        let skill = sqlx::query_as::<_, Skill>(&format!(
            r#"
            INSERT INTO skills (name, category, level, icon, color, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(data.category)
        .bind(data.level)
        .bind(&data.icon)
        .bind(&data.color)
        .bind(data.order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(skill)
    }

    /// List skills, optionally restricted to one category
    pub async fn list(&self, category: Option<SkillCategory>) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills \
             WHERE ($1::skill_category IS NULL OR category = $1) \
             ORDER BY category ASC, sort_order ASC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    /// All skills grouped by category
    pub async fn by_category(&self) -> Result<BTreeMap<String, Vec<Skill>>> {
        let skills = self.list(None).await?;

        let mut grouped: BTreeMap<String, Vec<Skill>> = BTreeMap::new();
        for skill in skills {
            grouped
                .entry(skill.category.as_str().to_string())
                .or_default()
                .push(skill);
        }

        Ok(grouped)
    }

    /// Find a skill by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(&format!(
            "SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(skill)
    }

    /// Update a skill; absent fields are left untouched
    pub async fn update(&self, id: i64, data: &UpdateSkillRequest) -> Result<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(&format!(
            r#"
            UPDATE skills SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                level = COALESCE($4, level),
                icon = COALESCE($5, icon),
                color = COALESCE($6, color),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(data.category)
        .bind(data.level)
        .bind(&data.icon)
        .bind(&data.color)
        .bind(data.order)
        .fetch_optional(&self.pool)
        .await?;

        Ok(skill)
    }

    /// Hard-delete a skill; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a starter skill unless one with this name already exists
    pub async fn create_if_absent(&self, data: &CreateSkillRequest) -> Result<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(&format!(
            r#"
            INSERT INTO skills (name, category, level, icon, color, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            RETURNING {SKILL_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(data.category)
        .bind(data.level)
        .bind(&data.icon)
        .bind(&data.color)
        .bind(data.order.unwrap_or(0))
        .fetch_optional(&self.pool)
        .await?;

        Ok(skill)
    }
}
