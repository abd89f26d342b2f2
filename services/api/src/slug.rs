//! Slug derivation for blogs and projects

use chrono::Utc;

/// Derive a URL-safe slug from a title.
///
/// Lowercases, strips everything outside `[a-z0-9 -]`, collapses
/// whitespace and hyphen runs to single hyphens, and trims leading and
/// trailing hyphens. Idempotent: slugifying a slug returns it unchanged.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            last_was_hyphen = false;
        } else if (c.is_whitespace() || c == '-') && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Disambiguate a colliding slug with the current epoch-millisecond timestamp
pub fn with_timestamp(slug: &str) -> String {
    format!("{}-{}", slug, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugs() {
        assert_eq!(slugify("Getting Started with Next.js 14"), "getting-started-with-nextjs-14");
        assert_eq!(slugify("FastBox - Parcel Delivery System"), "fastbox-parcel-delivery-system");
    }

    #[test]
    fn test_lowercase_and_charset() {
        let slug = slugify("Rust & Axum: A Love Story!");
        assert_eq!(slug, "rust-axum-a-love-story");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_no_leading_trailing_or_duplicate_hyphens() {
        assert_eq!(slugify("  --Hello   World--  "), "hello-world");
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        for title in ["Hello World", "Rust & Axum", "  spaced   out  ", "already-a-slug"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_timestamp_suffix_preserves_base() {
        let disambiguated = with_timestamp("hello-world");
        assert!(disambiguated.starts_with("hello-world-"));
        let suffix = &disambiguated["hello-world-".len()..];
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
