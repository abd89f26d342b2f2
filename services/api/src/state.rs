//! Application state shared across handlers

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::jwt::TokenService;
use crate::repositories::{
    BlogRepository, ContactRepository, EducationRepository, ExperienceRepository, OwnerRepository,
    ProjectRepository, SkillRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: AppConfig,
    pub tokens: TokenService,
    pub owners: OwnerRepository,
    pub blogs: BlogRepository,
    pub projects: ProjectRepository,
    pub skills: SkillRepository,
    pub educations: EducationRepository,
    pub experiences: ExperienceRepository,
    pub contacts: ContactRepository,
}

impl AppState {
    /// Build the application state from configuration and a live pool
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let tokens = TokenService::new(&config.jwt);

        AppState {
            owners: OwnerRepository::new(pool.clone()),
            blogs: BlogRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            skills: SkillRepository::new(pool.clone()),
            educations: EducationRepository::new(pool.clone()),
            experiences: ExperienceRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            db_pool: pool,
            config,
            tokens,
        }
    }
}
