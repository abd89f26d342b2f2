//! Query parsing and pagination for list endpoints
//!
//! List endpoints accept `page`, `limit`, boolean flags as `"true"`/`"false"`
//! strings and comma-separated sets; everything arrives as optional strings
//! and is parsed defensively so a malformed parameter falls back to the
//! default instead of failing the request.

use serde::Serialize;

/// Default page size for list endpoints
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on page size
pub const MAX_LIMIT: i64 = 100;

/// Parse a page number, defaulting to 1 for absent/non-numeric/zero input
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Parse a page size, defaulting to 10 and clamping to 1..=100
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

/// Parse a `"true"`/`"false"` query flag; anything else means "not filtered"
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match raw {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Split a comma-separated parameter into a non-empty list
pub fn parse_csv(raw: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = raw?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if values.is_empty() { None } else { Some(values) }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc`, falling back to the given default
    pub fn parse(raw: Option<&str>, default: SortOrder) -> SortOrder {
        match raw {
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            _ => default,
        }
    }

    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Pagination metadata returned with every list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// Derive pagination metadata; `limit` must be >= 1
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

/// A page of records plus its pagination metadata
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        Self {
            data,
            pagination: Pagination::new(page, limit, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("4")), 4);
    }

    #[test]
    fn test_limit_defaults_and_clamping() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("not-a-number")), 10);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("5")), 5);
        assert_eq!(parse_limit(Some("1000")), 100);
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!(parse_flag(Some("true")), Some(true));
        assert_eq!(parse_flag(Some("false")), Some(false));
        assert_eq!(parse_flag(Some("yes")), None);
        assert_eq!(parse_flag(None), None);
    }

    #[test]
    fn test_csv_parsing() {
        assert_eq!(
            parse_csv(Some("rust, axum ,sqlx")),
            Some(vec![
                "rust".to_string(),
                "axum".to_string(),
                "sqlx".to_string()
            ])
        );
        assert_eq!(parse_csv(Some("")), None);
        assert_eq!(parse_csv(Some(" , ")), None);
        assert_eq!(parse_csv(None), None);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 5, 23).total_pages, 5);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse(Some("asc"), SortOrder::Desc), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc"), SortOrder::Asc), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("up"), SortOrder::Desc), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None, SortOrder::Asc), SortOrder::Asc);
    }
}
