//! Database seeding: provisions the owner account and starter skills
//!
//! Idempotent; rows that already exist are left untouched, so the binary
//! is safe to re-run on every deploy.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::models::owner::Role;
use api::models::skill::{CreateSkillRequest, SkillCategory};
use api::password::hash_password;
use api::repositories::{OwnerRepository, SkillRepository};
use common::database::{DatabaseConfig, init_pool};
use common::error::DatabaseError;

fn starter_skills() -> Vec<CreateSkillRequest> {
    let skill = |name: &str, category: SkillCategory, level: i32, color: &str, order: i32| {
        CreateSkillRequest {
            name: name.to_string(),
            category,
            level,
            icon: None,
            color: Some(color.to_string()),
            order: Some(order),
        }
    };

    vec![
        skill("HTML5", SkillCategory::Frontend, 95, "orange-500", 1),
        skill("CSS3", SkillCategory::Frontend, 92, "blue-500", 2),
        skill("JavaScript", SkillCategory::Frontend, 88, "yellow-500", 3),
        skill("TypeScript", SkillCategory::Frontend, 82, "blue-600", 4),
        skill("React", SkillCategory::Frontend, 90, "cyan-500", 5),
        skill("Next.js", SkillCategory::Frontend, 85, "gray-800", 6),
        skill("Tailwind CSS", SkillCategory::Frontend, 93, "cyan-400", 7),
        skill("Node.js", SkillCategory::Backend, 85, "green-600", 1),
        skill("Express.js", SkillCategory::Backend, 88, "gray-700", 2),
        skill("RESTful APIs", SkillCategory::Backend, 90, "green-500", 3),
        skill("JWT Authentication", SkillCategory::Backend, 85, "red-500", 4),
        skill("MongoDB", SkillCategory::Database, 88, "green-600", 1),
        skill("PostgreSQL", SkillCategory::Database, 75, "blue-800", 2),
        skill("Git", SkillCategory::Tools, 90, "gray-800", 1),
        skill("Docker", SkillCategory::Tools, 65, "blue-400", 2),
        skill("Figma", SkillCategory::Design, 85, "purple-600", 1),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting database seeding");

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // The seed may run against a fresh database.
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    let owner_name =
        std::env::var("OWNER_NAME").unwrap_or_else(|_| "Nifazur Rahman".to_string());
    let owner_email = std::env::var("OWNER_EMAIL")
        .unwrap_or_else(|_| "nifazurrahman2872@gmail.com".to_string());
    let owner_password = std::env::var("OWNER_PASSWORD").unwrap_or_else(|_| "Admin@123".to_string());
    let owner_phone = std::env::var("OWNER_PHONE").ok();
    let owner_bio = std::env::var("OWNER_BIO").ok();

    let password_hash = hash_password(&owner_password)?;

    let owners = OwnerRepository::new(pool.clone());
    match owners
        .create_if_absent(
            &owner_name,
            &owner_email,
            &password_hash,
            owner_phone.as_deref(),
            owner_bio.as_deref(),
            Role::Owner,
        )
        .await?
    {
        Some(owner) => info!("Owner created: {}", owner.email),
        None => info!("Owner already exists: {}", owner_email),
    }

    let skills = SkillRepository::new(pool.clone());
    let mut seeded = 0;
    for skill in starter_skills() {
        if skills.create_if_absent(&skill).await?.is_some() {
            seeded += 1;
        }
    }
    info!("Skills seeded: {} new", seeded);

    info!("Database seeding completed successfully");

    Ok(())
}
