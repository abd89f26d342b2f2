//! Owner repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::models::owner::{Owner, OwnerProfile, Role, UpdateProfileRequest};

const OWNER_COLUMNS: &str =
    "id, name, email, password_hash, bio, phone, picture, role, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, name, email, bio, phone, picture, role, created_at, updated_at";

/// Owner repository
#[derive(Clone)]
pub struct OwnerRepository {
    pool: PgPool,
}

impl OwnerRepository {
    /// Create a new owner repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an owner by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Find an owner by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(&format!(
            "SELECT {OWNER_COLUMNS} FROM owners WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    /// Fetch the public-safe profile projection
    pub async fn find_profile(&self, id: i64) -> Result<Option<OwnerProfile>> {
        let profile = sqlx::query_as::<_, OwnerProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM owners WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<()> {
        info!("Updating password for owner: {}", id);

        sqlx::query("UPDATE owners SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Partially update the profile fields
    pub async fn update_profile(
        &self,
        id: i64,
        data: &UpdateProfileRequest,
    ) -> Result<Option<OwnerProfile>> {
        let profile = sqlx::query_as::<_, OwnerProfile>(&format!(
            r#"
            UPDATE owners SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                phone = COALESCE($4, phone),
                picture = COALESCE($5, picture),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.bio)
        .bind(&data.phone)
        .bind(&data.picture)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Insert the owner account unless one with this email already exists
    ///
    /// Used by the seed step; returns `None` when the account was already
    /// provisioned.
    pub async fn create_if_absent(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        phone: Option<&str>,
        bio: Option<&str>,
        role: Role,
    ) -> Result<Option<Owner>> {
        info!("Seeding owner account: {}", email);

        let owner = sqlx::query_as::<_, Owner>(&format!(
            r#"
            INSERT INTO owners (name, email, password_hash, phone, bio, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email) DO NOTHING
            RETURNING {OWNER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(bio)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }
}
