use std::sync::Arc;

use tracing::instrument;

use super::{Actor, update_id};
use crate::error::AppError;
use crate::models::shared::{ListQuery, Page};
use crate::models::user::{ProfileForm, UserView, ValidProfile};
use crate::services::image::ImageUpload;
use crate::services::{ImageService, UserService};
use crate::validation::{Mode, Validator};

/// Object store prefix for avatars.
pub const AVATAR_IMAGES: &str = "avatars";

pub struct UserController {
    users: Arc<UserService>,
    images: Arc<ImageService>,
    validator: Arc<dyn Validator<ProfileForm, Valid = ValidProfile>>,
}

impl UserController {
    pub fn new(
        users: Arc<UserService>,
        images: Arc<ImageService>,
        validator: Arc<dyn Validator<ProfileForm, Valid = ValidProfile>>,
    ) -> Self {
        Self {
            users,
            images,
            validator,
        }
    }

    pub async fn list(&self, actor: &Actor, query: &ListQuery) -> Result<Page<UserView>, AppError> {
        actor.require_admin()?;
        Ok(self.users.list(&query.filter()?).await?)
    }

    pub async fn get(&self, actor: &Actor, id: i32) -> Result<UserView, AppError> {
        actor.require_self_or_admin(id)?;
        Ok(self.users.get(id).await?)
    }

    #[instrument(skip_all, fields(actor = actor.user_id, id = ?form.id))]
    pub async fn update_profile(
        &self,
        actor: &Actor,
        form: ProfileForm,
        avatar: Option<ImageUpload>,
    ) -> Result<UserView, AppError> {
        let valid = self.validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        actor.require_self_or_admin(id)?;
        let existing = self.users.find(id).await?;

        let stored = match avatar {
            Some(upload) => Some(self.images.store(upload, AVATAR_IMAGES).await?),
            None => None,
        };
        let avatar_url = stored.as_ref().map(|s| s.url.clone());

        match self.users.update_profile(id, valid, avatar_url).await {
            Ok(view) => {
                if stored.is_some()
                    && let Some(old) = existing.avatar_url
                {
                    self.images.discard(&old).await;
                }
                Ok(view)
            }
            Err(e) => {
                if let Some(stored) = stored {
                    self.images.discard(&stored.url).await;
                }
                Err(e.into())
            }
        }
    }

    /// Administrators may delete any account except their own.
    #[instrument(skip(self, actor), fields(actor = actor.user_id))]
    pub async fn delete(&self, actor: &Actor, id: i32) -> Result<(), AppError> {
        actor.require_admin()?;
        if actor.user_id == id {
            return Err(AppError::Validation(
                "Administrators cannot delete their own account".into(),
            ));
        }
        let removed = self.users.delete(id).await?;
        if let Some(url) = removed.avatar_url {
            self.images.discard(&url).await;
        }
        Ok(())
    }
}
