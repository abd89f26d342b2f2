//! API service models

pub mod blog;
pub mod contact;
pub mod education;
pub mod experience;
pub mod owner;
pub mod project;
pub mod skill;

use serde::Serialize;

/// A grouping key with its occurrence count, used by the aggregate
/// endpoints (categories, tags, technologies)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}
