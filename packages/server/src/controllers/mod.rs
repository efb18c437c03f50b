//! Use-case orchestration.
//!
//! A controller runs one request through its stages: validate the payload,
//! authorize the caller where needed, resolve referenced records, store any
//! uploaded image, persist through the business services and hand back the
//! enriched view. A failure at any stage stops the request; nothing is
//! written before validation, reference checks and uploads have succeeded.

mod catalog;
mod material;
mod project;
mod sign_up;
mod tool;
mod user;

pub use catalog::CatalogController;
pub use material::MaterialController;
pub use project::ProjectController;
pub use sign_up::SignUpController;
pub use tool::ToolController;
pub use user::UserController;

use crate::entity::user::ADMIN_ROLE;
use crate::error::AppError;

/// The authenticated caller a use case runs on behalf of.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: i32,
    pub role: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    /// Allow the account owner and administrators.
    pub fn require_self_or_admin(&self, user_id: i32) -> Result<(), AppError> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

/// Id carried by an update payload; validation guarantees its presence.
fn update_id(id: Option<i32>) -> Result<i32, AppError> {
    id.ok_or_else(|| AppError::Validation("Id is required when updating".into()))
}
