//! Project repository for database operations

use anyhow::Result;
use common::error::is_unique_violation;
use sqlx::PgPool;
use tracing::info;

use crate::models::NamedCount;
use crate::models::project::{
    CreateProjectRequest, Project, ProjectFilter, ProjectStats, UpdateProjectRequest,
};
use crate::slug::{slugify, with_timestamp};

const PROJECT_COLUMNS: &str = "id, title, slug, description, thumbnail, images, live_url, \
     github_url, technologies, category, is_featured, status, start_date, end_date, features, \
     challenges, learnings, sort_order, created_at, updated_at";

/// Project repository
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a project; slug collisions are retried once with a timestamp suffix
    pub async fn create(&self, data: &CreateProjectRequest) -> Result<Project> {
        info!("Creating project: {}", data.title);

        let slug = slugify(&data.title);
        match self.insert(&slug, data).await {
            Err(e) if is_unique_violation(&e, Some("projects_slug_key")) => {
                let slug = with_timestamp(&slug);
                Ok(self.insert(&slug, data).await?)
            }
            other => Ok(other?),
        }
    }

    async fn insert(&self, slug: &str, data: &CreateProjectRequest) -> Result<Project, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects
                (title, slug, description, thumbnail, images, live_url, github_url,
                 technologies, category, is_featured, status, start_date, end_date,
                 features, challenges, learnings, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    COALESCE($11, 'COMPLETED'::project_status), $12, $13, $14, $15, $16, $17)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(slug)
        .bind(&data.description)
        .bind(&data.thumbnail)
        .bind(data.images.clone().unwrap_or_default())
        .bind(&data.live_url)
        .bind(&data.github_url)
        .bind(&data.technologies)
        .bind(&data.category)
        .bind(data.is_featured.unwrap_or(false))
        .bind(data.status)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.features.clone().unwrap_or_default())
        .bind(&data.challenges)
        .bind(&data.learnings)
        .bind(data.order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await
    }

    /// List projects matching the filter, returning the page and the total count
    pub async fn list(&self, filter: &ProjectFilter) -> Result<(Vec<Project>, i64)> {
        let offset = (filter.page - 1) * filter.limit;

        let where_clause = "WHERE ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR description ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR LOWER(category) = LOWER($2))
              AND ($3::text[] IS NULL OR technologies && $3)
              AND ($4::project_status IS NULL OR status = $4)
              AND ($5::boolean IS NULL OR is_featured = $5)";

        let page_sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects {where_clause} \
             ORDER BY {} {} LIMIT $6 OFFSET $7",
            filter.sort_by.column(),
            filter.sort_order.as_sql(),
        );
        let count_sql = format!("SELECT COUNT(*) FROM projects {where_clause}");

        let page_query = sqlx::query_as::<_, Project>(&page_sql)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.technologies)
            .bind(filter.status)
            .bind(filter.is_featured)
            .bind(filter.limit)
            .bind(offset)
            .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.technologies)
            .bind(filter.status)
            .bind(filter.is_featured)
            .fetch_one(&self.pool);

        let (projects, total) = tokio::try_join!(page_query, count_query)?;

        Ok((projects, total))
    }

    /// Find a project by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Find a project by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Update a project; regenerates the slug when the title changes
    pub async fn update(&self, id: i64, data: &UpdateProjectRequest) -> Result<Option<Project>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let slug = match &data.title {
            Some(title) if *title != existing.title => slugify(title),
            _ => existing.slug.clone(),
        };

        match self.apply_update(id, &slug, data).await {
            Err(e) if is_unique_violation(&e, Some("projects_slug_key")) => {
                let slug = with_timestamp(&slug);
                Ok(self.apply_update(id, &slug, data).await?)
            }
            other => Ok(other?),
        }
    }

    async fn apply_update(
        &self,
        id: i64,
        slug: &str,
        data: &UpdateProjectRequest,
    ) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                thumbnail = COALESCE($4, thumbnail),
                images = COALESCE($5, images),
                live_url = COALESCE($6, live_url),
                github_url = COALESCE($7, github_url),
                technologies = COALESCE($8, technologies),
                category = COALESCE($9, category),
                is_featured = COALESCE($10, is_featured),
                status = COALESCE($11, status),
                start_date = COALESCE($12, start_date),
                end_date = COALESCE($13, end_date),
                features = COALESCE($14, features),
                challenges = COALESCE($15, challenges),
                learnings = COALESCE($16, learnings),
                sort_order = COALESCE($17, sort_order),
                slug = $18,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.thumbnail)
        .bind(&data.images)
        .bind(&data.live_url)
        .bind(&data.github_url)
        .bind(&data.technologies)
        .bind(&data.category)
        .bind(data.is_featured)
        .bind(data.status)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.features)
        .bind(&data.challenges)
        .bind(&data.learnings)
        .bind(data.order)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// Hard-delete a project; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Featured projects in display order
    pub async fn featured(&self, limit: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE is_featured = TRUE ORDER BY sort_order ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Project categories with their counts
    pub async fn categories(&self) -> Result<Vec<NamedCount>> {
        let categories = sqlx::query_as::<_, NamedCount>(
            "SELECT category AS name, COUNT(*) AS count FROM projects \
             GROUP BY category ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Technology frequencies across all projects, most used first
    pub async fn technologies(&self) -> Result<Vec<NamedCount>> {
        let technologies = sqlx::query_as::<_, NamedCount>(
            "SELECT technology AS name, COUNT(*) AS count \
             FROM projects, UNNEST(technologies) AS technology \
             GROUP BY technology ORDER BY count DESC, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(technologies)
    }

    /// Aggregate statistics over the full project set
    pub async fn stats(&self) -> Result<ProjectStats> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects").fetch_one(&self.pool);
        let completed = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE status = 'COMPLETED'",
        )
        .fetch_one(&self.pool);
        let in_progress = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE status = 'IN_PROGRESS'",
        )
        .fetch_one(&self.pool);
        let featured = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE is_featured = TRUE",
        )
        .fetch_one(&self.pool);

        let (total_projects, completed_projects, in_progress_projects, featured_projects) =
            tokio::try_join!(total, completed, in_progress, featured)?;

        Ok(ProjectStats {
            total_projects,
            completed_projects,
            in_progress_projects,
            featured_projects,
        })
    }
}
