//! Input validation utilities
//!
//! Validators return the exact message named in the API contract so
//! clients can surface them directly.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ApiError, ApiResult};
use crate::models::blog::CreateBlogRequest;
use crate::models::contact::CreateContactRequest;
use crate::models::project::CreateProjectRequest;

/// Validate email shape
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Validate password strength
///
/// All four character classes are required and checked independently so
/// the caller learns exactly which one is missing.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }

    const SPECIAL: &str = "!@#$%^&*(),.?\":{}|<>";
    if !password.chars().any(|c| SPECIAL.contains(c)) {
        return Err("Password must contain at least one special character".to_string());
    }

    Ok(())
}

/// Validate blog creation input
pub fn validate_blog_input(payload: &CreateBlogRequest) -> ApiResult<()> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Content is required"));
    }

    if payload.category.trim().is_empty() {
        return Err(ApiError::validation("Category is required"));
    }

    if payload.title.len() < 5 {
        return Err(ApiError::validation("Title must be at least 5 characters long"));
    }

    if payload.content.len() < 50 {
        return Err(ApiError::validation(
            "Content must be at least 50 characters long",
        ));
    }

    Ok(())
}

/// Validate project creation input
pub fn validate_project_input(payload: &CreateProjectRequest) -> ApiResult<()> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    if payload.description.trim().is_empty() {
        return Err(ApiError::validation("Description is required"));
    }

    if payload.category.trim().is_empty() {
        return Err(ApiError::validation("Category is required"));
    }

    if payload.technologies.is_empty() {
        return Err(ApiError::validation("At least one technology is required"));
    }

    Ok(())
}

/// Validate contact message input
pub fn validate_contact_input(payload: &CreateContactRequest) -> ApiResult<()> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    if !validate_email(&payload.email) {
        return Err(ApiError::validation("Valid email is required"));
    }

    if payload.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    if payload.message.len() < 10 {
        return Err(ApiError::validation(
            "Message must be at least 10 characters long",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("owner+tag@site.example.org"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("spaces in@mail.com"));
        assert!(!validate_email("missing@tld"));
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("Ab1!"),
            Err("Password must be at least 8 characters long".to_string())
        );
    }

    #[test]
    fn test_password_missing_classes_named_distinctly() {
        assert_eq!(
            validate_password("lowercase1!"),
            Err("Password must contain at least one uppercase letter".to_string())
        );
        assert_eq!(
            validate_password("UPPERCASE1!"),
            Err("Password must contain at least one lowercase letter".to_string())
        );
        assert_eq!(
            validate_password("NoDigits!!"),
            Err("Password must contain at least one number".to_string())
        );
        assert_eq!(
            validate_password("NoSpecial1"),
            Err("Password must contain at least one special character".to_string())
        );
    }

    #[test]
    fn test_password_with_all_classes_passes() {
        assert_eq!(validate_password("Secret1!"), Ok(()));
        assert_eq!(validate_password("Admin@123"), Ok(()));
    }

    #[test]
    fn test_project_requires_technologies() {
        let payload = CreateProjectRequest {
            title: "Portfolio".to_string(),
            description: "A personal portfolio website".to_string(),
            thumbnail: "https://example.com/shot.png".to_string(),
            images: None,
            live_url: None,
            github_url: None,
            technologies: vec![],
            category: "Web Apps".to_string(),
            is_featured: None,
            status: None,
            start_date: None,
            end_date: None,
            features: None,
            challenges: None,
            learnings: None,
            order: None,
        };

        let err = validate_project_input(&payload).unwrap_err();
        assert_eq!(err.to_string(), "At least one technology is required");
    }
}
