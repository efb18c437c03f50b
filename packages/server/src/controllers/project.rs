use std::sync::Arc;

use tracing::instrument;

use super::update_id;
use crate::error::AppError;
use crate::models::project::{
    ProjectForm, ProjectImageForm, ProjectImageView, ProjectView, ValidProject,
    ValidProjectImage,
};
use crate::models::shared::{ListQuery, Page};
use crate::services::image::ImageUpload;
use crate::services::{ImageService, ProjectService};
use crate::validation::{Mode, Validator};

/// Object store prefix for project gallery images.
pub const PROJECT_IMAGES: &str = "projects";

pub struct ProjectController {
    projects: Arc<ProjectService>,
    images: Arc<ImageService>,
    validator: Arc<dyn Validator<ProjectForm, Valid = ValidProject>>,
    image_validator: Arc<dyn Validator<ProjectImageForm, Valid = ValidProjectImage>>,
}

impl ProjectController {
    pub fn new(
        projects: Arc<ProjectService>,
        images: Arc<ImageService>,
        validator: Arc<dyn Validator<ProjectForm, Valid = ValidProject>>,
        image_validator: Arc<dyn Validator<ProjectImageForm, Valid = ValidProjectImage>>,
    ) -> Self {
        Self {
            projects,
            images,
            validator,
            image_validator,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<ProjectView>, AppError> {
        Ok(self.projects.list(&query.filter()?).await?)
    }

    pub async fn get(&self, id: i32) -> Result<ProjectView, AppError> {
        Ok(self.projects.get(id).await?)
    }

    #[instrument(skip_all, fields(name = ?form.name))]
    pub async fn create(&self, form: ProjectForm) -> Result<ProjectView, AppError> {
        let valid = self.validator.validate(&form, Mode::Create)?;
        Ok(self.projects.create(valid).await?)
    }

    #[instrument(skip_all, fields(id = ?form.id))]
    pub async fn update(&self, form: ProjectForm) -> Result<ProjectView, AppError> {
        let valid = self.validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        Ok(self.projects.update(id, valid).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        for url in self.projects.delete(id).await? {
            self.images.discard(&url).await;
        }
        Ok(())
    }

    /// Upload an image and attach it to the project gallery.
    #[instrument(skip(self, form, image))]
    pub async fn add_image(
        &self,
        project_id: i32,
        form: ProjectImageForm,
        image: Option<ImageUpload>,
    ) -> Result<ProjectImageView, AppError> {
        let valid = self.image_validator.validate(&form, Mode::Create)?;
        let upload = image.ok_or_else(|| AppError::Validation("An image file is required".into()))?;
        self.projects.require(project_id).await?;

        let stored = self.images.store(upload, PROJECT_IMAGES).await?;
        match self
            .projects
            .add_image(project_id, valid, stored.url.clone())
            .await
        {
            Ok(view) => Ok(view),
            Err(e) => {
                self.images.discard(&stored.url).await;
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_image(&self, project_id: i32, image_id: i32) -> Result<(), AppError> {
        let removed = self.projects.remove_image(project_id, image_id).await?;
        self.images.discard(&removed.url).await;
        Ok(())
    }
}
