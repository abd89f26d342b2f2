//! Owner model and related functionality
//!
//! The owner is the single privileged principal. The account is created
//! by the seed step and only ever mutated through the profile-update and
//! password-change operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Privileged role, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "owner_role", rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Admin,
}

/// Owner entity
///
/// Deliberately not serializable: responses go through [`OwnerProfile`]
/// so the password hash can never leak into a payload.
#[derive(Debug, Clone, FromRow)]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public-safe owner projection
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Owner> for OwnerProfile {
    fn from(owner: Owner) -> Self {
        OwnerProfile {
            id: owner.id,
            name: owner.name,
            email: owner.email,
            bio: owner.bio,
            phone: owner.phone,
            picture: owner.picture,
            role: owner.role,
            created_at: owner.created_at,
            updated_at: owner.updated_at,
        }
    }
}

/// Login payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response: the token pair plus a public-safe user projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: OwnerProfile,
}

/// Refresh payload; the token may also arrive via the `refreshToken` cookie
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

/// Refresh response: a new access token only, the refresh token is not rotated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// Password change payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Profile update payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"OWNER\"").unwrap(),
            Role::Owner
        );
        assert!(serde_json::from_str::<Role>("\"VISITOR\"").is_err());
    }

    #[test]
    fn test_profile_serializes_camel_case_without_hash() {
        let profile = OwnerProfile {
            id: 1,
            name: "Owner".to_string(),
            email: "a@b.com".to_string(),
            bio: None,
            phone: None,
            picture: None,
            role: Role::Owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }
}
