//! Business services.
//!
//! Services own the domain rules that need storage: enrichment of records
//! with related names and counts, cascades on delete, and existence checks
//! for referenced rows. They hold their repositories behind trait objects so
//! any persistence implementation can be wired in.

pub mod catalog;
pub mod image;
pub mod maintenance;
pub mod material;
pub mod project;
pub mod tool;
pub mod user;

use thiserror::Error;

use crate::repository::RepoError;

pub use catalog::{CategoryService, ProviderService};
pub use image::ImageService;
pub use maintenance::MaintenanceNoteService;
pub use material::MaterialService;
pub use project::ProjectService;
pub use tool::ToolService;
pub use user::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            RepoError::Conflict(detail) => {
                // The detail can carry constraint names; keep it out of responses.
                tracing::debug!(%detail, "unique constraint violated");
                ServiceError::Conflict("Record already exists".into())
            }
            RepoError::Persistence(detail) => ServiceError::Persistence(detail),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Deduplicated ids in first-seen order.
pub(crate) fn unique_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut out: Vec<i32> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
