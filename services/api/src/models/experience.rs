//! Experience model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Experience entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: bool,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Experience creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExperienceRequest {
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: Option<bool>,
    pub description: String,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub order: Option<i32>,
}

/// Experience update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperienceRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub order: Option<i32>,
}
