use std::sync::Arc;

use tracing::instrument;

use super::ServiceResult;
use crate::entity::user;
use crate::models::shared::Page;
use crate::models::user::{ProfileDraft, UserDraft, UserView, ValidProfile, ValidSignUp};
use crate::repository::{ListFilter, UserRepository};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<UserView>> {
        let (rows, total) = tokio::try_join!(self.repo.find_all(filter), self.repo.count(filter))?;
        Ok(Page {
            items: rows.into_iter().map(UserView::from).collect(),
            total,
        })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<UserView> {
        Ok(self.repo.find_by_id(id).await?.into())
    }

    /// Raw row, for callers that need the stored avatar URL.
    pub async fn find(&self, id: i32) -> ServiceResult<user::Model> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn email_taken(&self, email: &str) -> ServiceResult<bool> {
        Ok(self.repo.find_by_email(email).await?.is_some())
    }

    /// Account row including the password hash, for credential checks.
    pub async fn find_credentials(&self, email: &str) -> ServiceResult<Option<user::Model>> {
        Ok(self.repo.find_by_email(email).await?)
    }

    #[instrument(skip(self, valid, password_hash), fields(email = %valid.email))]
    pub async fn register(
        &self,
        valid: ValidSignUp,
        role: &str,
        password_hash: String,
    ) -> ServiceResult<UserView> {
        let model = self
            .repo
            .create(UserDraft {
                email: valid.email,
                full_name: valid.full_name,
                phone: valid.phone,
                role: role.to_string(),
                password_hash,
            })
            .await?;
        tracing::info!(user_id = model.id, role, "User registered");
        Ok(model.into())
    }

    /// `avatar_url: None` keeps the current avatar.
    pub async fn update_profile(
        &self,
        id: i32,
        valid: ValidProfile,
        avatar_url: Option<String>,
    ) -> ServiceResult<UserView> {
        let model = self
            .repo
            .update_profile(
                id,
                ProfileDraft {
                    full_name: valid.full_name,
                    phone: valid.phone,
                    avatar_url,
                },
            )
            .await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<user::Model> {
        let existing = self.repo.find_by_id(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(existing)
    }
}
