//! Blog repository for database operations

use anyhow::Result;
use common::error::is_unique_violation;
use sqlx::PgPool;
use tracing::info;

use crate::models::NamedCount;
use crate::models::blog::{Blog, BlogFilter, BlogStats, CreateBlogRequest, UpdateBlogRequest};
use crate::slug::{slugify, with_timestamp};

const BLOG_COLUMNS: &str = "id, title, slug, content, excerpt, thumbnail, category, tags, \
     is_published, is_featured, views, read_time, author_id, created_at, updated_at";

/// Reading time at 200 words per minute, rounded up
fn derive_read_time(content: &str) -> i32 {
    let words = content.split_whitespace().count() as i32;
    ((words + 199) / 200).max(1)
}

/// Blog repository
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new blog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a blog post
    ///
    /// The slug is derived from the title; on a collision with an existing
    /// slug the unique constraint fires and the insert is retried once
    /// with an epoch-millisecond suffix.
    pub async fn create(&self, author_id: i64, data: &CreateBlogRequest) -> Result<Blog> {
        info!("Creating blog: {}", data.title);

        let slug = slugify(&data.title);
        match self.insert(author_id, &slug, data).await {
            Err(e) if is_unique_violation(&e, Some("blogs_slug_key")) => {
                let slug = with_timestamp(&slug);
                Ok(self.insert(author_id, &slug, data).await?)
            }
            other => Ok(other?),
        }
    }

    async fn insert(
        &self,
        author_id: i64,
        slug: &str,
        data: &CreateBlogRequest,
    ) -> Result<Blog, sqlx::Error> {
        let excerpt = data
            .excerpt
            .clone()
            .unwrap_or_else(|| data.content.chars().take(150).collect());
        let read_time = data
            .read_time
            .unwrap_or_else(|| derive_read_time(&data.content));

        sqlx::query_as::<_, Blog>(&format!(
            r#"
            INSERT INTO blogs
                (title, slug, content, excerpt, thumbnail, category, tags,
                 is_published, is_featured, read_time, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(slug)
        .bind(&data.content)
        .bind(&excerpt)
        .bind(&data.thumbnail)
        .bind(&data.category)
        .bind(data.tags.clone().unwrap_or_default())
        .bind(data.is_published.unwrap_or(false))
        .bind(data.is_featured.unwrap_or(false))
        .bind(read_time)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
    }

    /// List blogs matching the filter, returning the page and the total count
    ///
    /// The page fetch and the count run in parallel.
    pub async fn list(&self, filter: &BlogFilter) -> Result<(Vec<Blog>, i64)> {
        let offset = (filter.page - 1) * filter.limit;

        let where_clause = "WHERE ($1::text IS NULL
                   OR title ILIKE '%' || $1 || '%'
                   OR content ILIKE '%' || $1 || '%'
                   OR excerpt ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR LOWER(category) = LOWER($2))
              AND ($3::text[] IS NULL OR tags && $3)
              AND ($4::boolean IS NULL OR is_published = $4)
              AND ($5::boolean IS NULL OR is_featured = $5)";

        let page_sql = format!(
            "SELECT {BLOG_COLUMNS} FROM blogs {where_clause} \
             ORDER BY {} {} LIMIT $6 OFFSET $7",
            filter.sort_by.column(),
            filter.sort_order.as_sql(),
        );
        let count_sql = format!("SELECT COUNT(*) FROM blogs {where_clause}");

        let page_query = sqlx::query_as::<_, Blog>(&page_sql)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.tags)
            .bind(filter.is_published)
            .bind(filter.is_featured)
            .bind(filter.limit)
            .bind(offset)
            .fetch_all(&self.pool);

        let count_query = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&filter.search)
            .bind(&filter.category)
            .bind(&filter.tags)
            .bind(filter.is_published)
            .bind(filter.is_featured)
            .fetch_one(&self.pool);

        let (blogs, total) = tokio::try_join!(page_query, count_query)?;

        Ok((blogs, total))
    }

    /// Find a blog by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Blog>> {
        let blog =
            sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(blog)
    }

    /// Find a blog by slug, optionally incrementing its view counter
    pub async fn find_by_slug(&self, slug: &str, increment_view: bool) -> Result<Option<Blog>> {
        let blog = if increment_view {
            sqlx::query_as::<_, Blog>(&format!(
                "UPDATE blogs SET views = views + 1 WHERE slug = $1 RETURNING {BLOG_COLUMNS}"
            ))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Blog>(&format!(
                "SELECT {BLOG_COLUMNS} FROM blogs WHERE slug = $1"
            ))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
        };

        Ok(blog)
    }

    /// Update a blog; regenerates the slug when the title changes
    pub async fn update(&self, id: i64, data: &UpdateBlogRequest) -> Result<Option<Blog>> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let slug = match &data.title {
            Some(title) if *title != existing.title => slugify(title),
            _ => existing.slug.clone(),
        };

        // Content changes always recompute the reading time.
        let read_time = data.content.as_deref().map(derive_read_time);

        match self.apply_update(id, &slug, data, read_time).await {
            Err(e) if is_unique_violation(&e, Some("blogs_slug_key")) => {
                let slug = with_timestamp(&slug);
                Ok(self.apply_update(id, &slug, data, read_time).await?)
            }
            other => Ok(other?),
        }
    }

    async fn apply_update(
        &self,
        id: i64,
        slug: &str,
        data: &UpdateBlogRequest,
        read_time: Option<i32>,
    ) -> Result<Option<Blog>, sqlx::Error> {
        sqlx::query_as::<_, Blog>(&format!(
            r#"
            UPDATE blogs SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                excerpt = COALESCE($4, excerpt),
                thumbnail = COALESCE($5, thumbnail),
                category = COALESCE($6, category),
                tags = COALESCE($7, tags),
                is_published = COALESCE($8, is_published),
                is_featured = COALESCE($9, is_featured),
                read_time = COALESCE($10, read_time),
                slug = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.excerpt)
        .bind(&data.thumbnail)
        .bind(&data.category)
        .bind(&data.tags)
        .bind(data.is_published)
        .bind(data.is_featured)
        .bind(read_time.or(data.read_time))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }

    /// Hard-delete a blog; returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Published + featured blogs, most viewed first
    pub async fn featured(&self, limit: i64) -> Result<Vec<Blog>> {
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs \
             WHERE is_published = TRUE AND is_featured = TRUE \
             ORDER BY views DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(blogs)
    }

    /// Categories of published blogs with their post counts
    pub async fn categories(&self) -> Result<Vec<NamedCount>> {
        let categories = sqlx::query_as::<_, NamedCount>(
            "SELECT category AS name, COUNT(*) AS count FROM blogs \
             WHERE is_published = TRUE GROUP BY category ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Tag frequencies across published blogs, most used first
    pub async fn tags(&self) -> Result<Vec<NamedCount>> {
        let tags = sqlx::query_as::<_, NamedCount>(
            "SELECT tag AS name, COUNT(*) AS count \
             FROM blogs, UNNEST(tags) AS tag \
             WHERE is_published = TRUE \
             GROUP BY tag ORDER BY count DESC, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Aggregate statistics over the full blog set
    pub async fn stats(&self) -> Result<BlogStats> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs").fetch_one(&self.pool);
        let published =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs WHERE is_published = TRUE")
                .fetch_one(&self.pool);
        let drafts =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blogs WHERE is_published = FALSE")
                .fetch_one(&self.pool);
        let views =
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(views), 0) FROM blogs")
                .fetch_one(&self.pool);
        let featured = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM blogs WHERE is_featured = TRUE AND is_published = TRUE",
        )
        .fetch_one(&self.pool);

        let (total_blogs, published_blogs, draft_blogs, total_views, featured_blogs) =
            tokio::try_join!(total, published, drafts, views, featured)?;

        Ok(BlogStats {
            total_blogs,
            published_blogs,
            draft_blogs,
            total_views,
            featured_blogs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_time_is_ceiling_at_200_wpm() {
        let words = |n: usize| vec!["word"; n].join(" ");
        assert_eq!(derive_read_time(&words(1)), 1);
        assert_eq!(derive_read_time(&words(200)), 1);
        assert_eq!(derive_read_time(&words(201)), 2);
        assert_eq!(derive_read_time(&words(1600)), 8);
    }

    #[test]
    fn test_read_time_never_zero() {
        assert_eq!(derive_read_time(""), 1);
    }
}
