//! Blog model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::{SortOrder, parse_csv, parse_flag, parse_limit, parse_page};

/// Blog entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub views: i64,
    pub read_time: i32,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Blog creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub read_time: Option<i32>,
}

/// Blog update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub read_time: Option<i32>,
}

/// Sortable blog columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogSortBy {
    CreatedAt,
    Views,
    Title,
}

impl BlogSortBy {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("views") => BlogSortBy::Views,
            Some("title") => BlogSortBy::Title,
            _ => BlogSortBy::CreatedAt,
        }
    }

    /// Whitelisted column name; never interpolate raw user input here
    pub fn column(self) -> &'static str {
        match self {
            BlogSortBy::CreatedAt => "created_at",
            BlogSortBy::Views => "views",
            BlogSortBy::Title => "title",
        }
    }
}

/// Raw query string for blog list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub is_published: Option<String>,
    pub is_featured: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Parsed blog list filter
#[derive(Debug, Clone)]
pub struct BlogFilter {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub sort_by: BlogSortBy,
    pub sort_order: SortOrder,
}

impl From<BlogListQuery> for BlogFilter {
    fn from(query: BlogListQuery) -> Self {
        BlogFilter {
            page: parse_page(query.page.as_deref()),
            limit: parse_limit(query.limit.as_deref()),
            search: query.search.filter(|s| !s.is_empty()),
            category: query.category.filter(|s| !s.is_empty()),
            tags: parse_csv(query.tags.as_deref()),
            is_published: parse_flag(query.is_published.as_deref()),
            is_featured: parse_flag(query.is_featured.as_deref()),
            sort_by: BlogSortBy::parse(query.sort_by.as_deref()),
            sort_order: SortOrder::parse(query.sort_order.as_deref(), SortOrder::Desc),
        }
    }
}

/// Blog aggregate statistics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_blogs: i64,
    pub published_blogs: i64,
    pub draft_blogs: i64,
    pub total_views: i64,
    pub featured_blogs: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = BlogFilter::from(BlogListQuery::default());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.sort_by, BlogSortBy::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_filter_parses_flags_and_tags() {
        let filter = BlogFilter::from(BlogListQuery {
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
            tags: Some("rust,axum".to_string()),
            is_published: Some("true".to_string()),
            is_featured: Some("maybe".to_string()),
            sort_by: Some("views".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        });

        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.tags.as_deref(), Some(&["rust".to_string(), "axum".to_string()][..]));
        assert_eq!(filter.is_published, Some(true));
        assert_eq!(filter.is_featured, None);
        assert_eq!(filter.sort_by, BlogSortBy::Views);
        assert_eq!(filter.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_unknown_sort_column_falls_back() {
        assert_eq!(
            BlogSortBy::parse(Some("password_hash")),
            BlogSortBy::CreatedAt
        );
    }
}
