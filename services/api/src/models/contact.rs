//! Contact message model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pagination::{parse_flag, parse_limit, parse_page};

/// Contact message entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact message creation payload (the one public write in the system)
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Raw query string for the message list endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub is_read: Option<String>,
}

/// Parsed message list filter
#[derive(Debug, Clone)]
pub struct ContactFilter {
    pub page: i64,
    pub limit: i64,
    pub is_read: Option<bool>,
}

impl From<ContactListQuery> for ContactFilter {
    fn from(query: ContactListQuery) -> Self {
        ContactFilter {
            page: parse_page(query.page.as_deref()),
            limit: parse_limit(query.limit.as_deref()),
            is_read: parse_flag(query.is_read.as_deref()),
        }
    }
}

/// Message counts for the dashboard
#[derive(Debug, Serialize)]
pub struct ContactStats {
    pub total: i64,
    pub unread: i64,
    pub read: i64,
}
