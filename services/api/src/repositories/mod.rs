//! Repositories for database operations

pub mod blog;
pub mod contact;
pub mod education;
pub mod experience;
pub mod owner;
pub mod project;
pub mod skill;

pub use blog::BlogRepository;
pub use contact::ContactRepository;
pub use education::EducationRepository;
pub use experience::ExperienceRepository;
pub use owner::OwnerRepository;
pub use project::ProjectRepository;
pub use skill::SkillRepository;
