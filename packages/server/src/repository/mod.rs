//! Persistence seams.
//!
//! Each entity gets an async trait describing the operations business
//! services rely on, plus a sea-orm implementation sharing the process-wide
//! `DatabaseConnection`. Repositories do no business validation.

mod category;
mod maintenance_note;
mod material;
mod project;
mod project_image;
mod provider;
mod tool;
mod user;

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{ExprTrait, Func, IntoColumnRef, LikeExpr};
use sea_orm::{Condition, DbErr, SqlErr, prelude::Expr};
use thiserror::Error;

pub use category::SqlCategoryRepository;
pub use maintenance_note::SqlMaintenanceNoteRepository;
pub use material::SqlMaterialRepository;
pub use project::SqlProjectRepository;
pub use project_image::SqlProjectImageRepository;
pub use provider::SqlProviderRepository;
pub use tool::SqlToolRepository;
pub use user::SqlUserRepository;

use crate::entity;
use crate::models::catalog::{CategoryDraft, ProviderDraft};
use crate::models::maintenance::NoteDraft;
use crate::models::material::MaterialDraft;
use crate::models::project::{ProjectDraft, ProjectImageDraft};
use crate::models::shared::escape_like;
use crate::models::tool::ToolDraft;
use crate::models::user::{ProfileDraft, UserDraft};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => RepoError::Conflict(detail),
            _ => RepoError::Persistence(err.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Narrowing and paging applied to `find_all` / `count`.
///
/// `count` ignores `offset` and `limit`.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i32>,
    pub provider_id: Option<i32>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListFilter {
    /// Lower-cased `%term%` LIKE pattern with wildcards escaped, if a
    /// non-blank search term was given.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }
        Some(format!("%{}%", escape_like(&term.to_lowercase())))
    }

    /// Material status filter: `active`/`true` or `inactive`/`false`.
    pub fn active(&self) -> Option<bool> {
        match self.status.as_deref()?.trim().to_lowercase().as_str() {
            "active" | "true" => Some(true),
            "inactive" | "false" => Some(false),
            _ => None,
        }
    }
}

/// Case-insensitive substring match on `column`.
pub(crate) fn name_like<C: IntoColumnRef>(column: C, pattern: String) -> Condition {
    Condition::all()
        .add(Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\')))
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, draft: CategoryDraft) -> RepoResult<entity::category::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::category::Model>;
    async fn find_by_ids(&self, ids: &[i32]) -> RepoResult<Vec<entity::category::Model>>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::category::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update(&self, id: i32, draft: CategoryDraft) -> RepoResult<entity::category::Model>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn create(&self, draft: ProviderDraft) -> RepoResult<entity::provider::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::provider::Model>;
    async fn find_by_ids(&self, ids: &[i32]) -> RepoResult<Vec<entity::provider::Model>>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::provider::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update(&self, id: i32, draft: ProviderDraft) -> RepoResult<entity::provider::Model>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}

#[async_trait]
pub trait ToolRepository: Send + Sync {
    async fn create(&self, draft: ToolDraft) -> RepoResult<entity::tool::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::tool::Model>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::tool::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update(&self, id: i32, draft: ToolDraft) -> RepoResult<entity::tool::Model>;
    /// Remove the tool together with its maintenance notes in one
    /// transaction. Returns the number of notes removed.
    async fn delete(&self, id: i32) -> RepoResult<u64>;
}

#[async_trait]
pub trait MaintenanceNoteRepository: Send + Sync {
    async fn create(&self, draft: NoteDraft) -> RepoResult<entity::maintenance_note::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::maintenance_note::Model>;
    /// Newest first.
    async fn find_by_tool(&self, tool_id: i32) -> RepoResult<Vec<entity::maintenance_note::Model>>;
    /// Tools without notes are absent from the map.
    async fn count_by_tools(&self, tool_ids: &[i32]) -> RepoResult<HashMap<i32, u64>>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, draft: MaterialDraft) -> RepoResult<entity::material::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::material::Model>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::material::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update(&self, id: i32, draft: MaterialDraft) -> RepoResult<entity::material::Model>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, draft: UserDraft) -> RepoResult<entity::user::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::user::Model>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<entity::user::Model>>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::user::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update_profile(&self, id: i32, draft: ProfileDraft) -> RepoResult<entity::user::Model>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, draft: ProjectDraft) -> RepoResult<entity::project::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::project::Model>;
    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<entity::project::Model>>;
    async fn count(&self, filter: &ListFilter) -> RepoResult<u64>;
    async fn update(&self, id: i32, draft: ProjectDraft) -> RepoResult<entity::project::Model>;
    /// Remove the project and its image rows in one transaction, returning
    /// the removed image rows.
    async fn delete(&self, id: i32) -> RepoResult<Vec<entity::project_image::Model>>;
}

#[async_trait]
pub trait ProjectImageRepository: Send + Sync {
    async fn create(&self, draft: ProjectImageDraft) -> RepoResult<entity::project_image::Model>;
    async fn find_by_id(&self, id: i32) -> RepoResult<entity::project_image::Model>;
    /// Oldest first.
    async fn find_by_project(&self, project_id: i32) -> RepoResult<Vec<entity::project_image::Model>>;
    async fn find_by_projects(&self, project_ids: &[i32]) -> RepoResult<Vec<entity::project_image::Model>>;
    async fn delete(&self, id: i32) -> RepoResult<()>;
}
