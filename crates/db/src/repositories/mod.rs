//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Repositories return raw
//! `sqlx::Error`; domain classification happens in the service layer
//! ([`crate::provisioning`]) and in HTTP error mapping.

pub mod funding_repo;
pub mod link_repo;
pub mod project_repo;
pub mod scope_repo;
pub mod task_repo;
pub mod template_repo;

pub use funding_repo::FundingRepo;
pub use link_repo::LinkRepo;
pub use project_repo::ProjectRepo;
pub use scope_repo::ScopeRepo;
pub use task_repo::TaskRepo;
pub use template_repo::TemplateRepo;
