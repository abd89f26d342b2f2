//! Project model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::{SortOrder, parse_csv, parse_flag, parse_limit, parse_page};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "project_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("COMPLETED") => Some(ProjectStatus::Completed),
            Some("IN_PROGRESS") => Some(ProjectStatus::InProgress),
            Some("PLANNED") => Some(ProjectStatus::Planned),
            _ => None,
        }
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
    pub category: String,
    pub is_featured: bool,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub features: Vec<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    pub images: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub category: String,
    pub is_featured: Option<bool>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub features: Option<Vec<String>>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub order: Option<i32>,
}

/// Project update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub features: Option<Vec<String>>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub order: Option<i32>,
}

/// Sortable project columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSortBy {
    Order,
    CreatedAt,
    Title,
}

impl ProjectSortBy {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("createdAt") => ProjectSortBy::CreatedAt,
            Some("title") => ProjectSortBy::Title,
            _ => ProjectSortBy::Order,
        }
    }

    /// Whitelisted column name; never interpolate raw user input here
    pub fn column(self) -> &'static str {
        match self {
            ProjectSortBy::Order => "sort_order",
            ProjectSortBy::CreatedAt => "created_at",
            ProjectSortBy::Title => "title",
        }
    }
}

/// Raw query string for project list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<String>,
    pub status: Option<String>,
    pub is_featured: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Parsed project list filter
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    pub page: i64,
    pub limit: i64,
    pub search: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub is_featured: Option<bool>,
    pub sort_by: ProjectSortBy,
    pub sort_order: SortOrder,
}

impl From<ProjectListQuery> for ProjectFilter {
    fn from(query: ProjectListQuery) -> Self {
        ProjectFilter {
            page: parse_page(query.page.as_deref()),
            limit: parse_limit(query.limit.as_deref()),
            search: query.search.filter(|s| !s.is_empty()),
            category: query.category.filter(|s| !s.is_empty()),
            technologies: parse_csv(query.technologies.as_deref()),
            status: ProjectStatus::parse(query.status.as_deref()),
            is_featured: parse_flag(query.is_featured.as_deref()),
            sort_by: ProjectSortBy::parse(query.sort_by.as_deref()),
            sort_order: SortOrder::parse(query.sort_order.as_deref(), SortOrder::Asc),
        }
    }
}

/// Project aggregate statistics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: i64,
    pub completed_projects: i64,
    pub in_progress_projects: i64,
    pub featured_projects: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<ProjectStatus>("\"PLANNED\"").unwrap(),
            ProjectStatus::Planned
        );
    }

    #[test]
    fn test_filter_defaults_to_order_asc() {
        let filter = ProjectFilter::from(ProjectListQuery::default());
        assert_eq!(filter.sort_by, ProjectSortBy::Order);
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let filter = ProjectFilter::from(ProjectListQuery {
            status: Some("ARCHIVED".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_entity_serializes_order_field() {
        let project = Project {
            id: 1,
            title: "Portfolio".to_string(),
            slug: "portfolio".to_string(),
            description: "desc".to_string(),
            thumbnail: "thumb.png".to_string(),
            images: vec![],
            live_url: None,
            github_url: None,
            technologies: vec!["Rust".to_string()],
            category: "Web Apps".to_string(),
            is_featured: false,
            status: ProjectStatus::Completed,
            start_date: None,
            end_date: None,
            features: vec![],
            challenges: None,
            learnings: None,
            order: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["order"], 3);
        assert_eq!(value["status"], "COMPLETED");
        assert!(value.get("sortOrder").is_none());
    }
}
