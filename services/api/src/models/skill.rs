//! Skill model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Skill grouping, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "skill_category", rename_all = "UPPERCASE")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Tools,
    Design,
    Other,
}

impl SkillCategory {
    /// Parse the query-parameter form; unknown values mean "no filter"
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("FRONTEND") => Some(SkillCategory::Frontend),
            Some("BACKEND") => Some(SkillCategory::Backend),
            Some("DATABASE") => Some(SkillCategory::Database),
            Some("TOOLS") => Some(SkillCategory::Tools),
            Some("DESIGN") => Some(SkillCategory::Design),
            Some("OTHER") => Some(SkillCategory::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "FRONTEND",
            SkillCategory::Backend => "BACKEND",
            SkillCategory::Database => "DATABASE",
            SkillCategory::Tools => "TOOLS",
            SkillCategory::Design => "DESIGN",
            SkillCategory::Other => "OTHER",
        }
    }
}

/// Skill entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i64,
    pub name: String,
    pub category: SkillCategory,
    pub level: i32,
    pub icon: Option<String>,
    pub color: Option<String>,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Skill creation payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    pub name: String,
    pub category: SkillCategory,
    pub level: i32,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub order: Option<i32>,
}

/// Skill update payload; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub level: Option<i32>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub order: Option<i32>,
}

/// Query string for skill listing
#[derive(Debug, Default, Deserialize)]
pub struct SkillListQuery {
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        assert_eq!(
            serde_json::to_string(&SkillCategory::Frontend).unwrap(),
            "\"FRONTEND\""
        );
        assert_eq!(
            serde_json::from_str::<SkillCategory>("\"TOOLS\"").unwrap(),
            SkillCategory::Tools
        );
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(SkillCategory::parse(Some("BACKEND")), Some(SkillCategory::Backend));
        assert_eq!(SkillCategory::parse(Some("backend")), None);
        assert_eq!(SkillCategory::parse(None), None);
    }
}
