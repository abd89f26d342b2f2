//! Education model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Education entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i64,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Vec<String>,
    pub grade: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Education creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEducationRequest {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub grade: Option<String>,
    pub order: Option<i32>,
}

/// Education update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEducationRequest {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub grade: Option<String>,
    pub order: Option<i32>,
}
