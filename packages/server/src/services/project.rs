use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use super::{ServiceError, ServiceResult};
use crate::entity::project_image;
use crate::models::project::{
    ProjectDraft, ProjectImageDraft, ProjectImageView, ProjectView, ValidProject,
    ValidProjectImage,
};
use crate::models::shared::Page;
use crate::repository::{ListFilter, ProjectImageRepository, ProjectRepository};

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    images: Arc<dyn ProjectImageRepository>,
}

impl ProjectService {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        images: Arc<dyn ProjectImageRepository>,
    ) -> Self {
        Self { projects, images }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<ProjectView>> {
        let (rows, total) =
            tokio::try_join!(self.projects.find_all(filter), self.projects.count(filter))?;

        let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
        let mut by_project: HashMap<i32, Vec<project_image::Model>> = HashMap::new();
        for image in self.images.find_by_projects(&ids).await? {
            by_project.entry(image.project_id).or_default().push(image);
        }

        let items = rows
            .into_iter()
            .map(|p| {
                let images = by_project.remove(&p.id).unwrap_or_default();
                ProjectView::new(p, images)
            })
            .collect();
        Ok(Page { items, total })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<ProjectView> {
        let project = self.projects.find_by_id(id).await?;
        let images = self.images.find_by_project(id).await?;
        Ok(ProjectView::new(project, images))
    }

    /// Fail with `NotFound` unless the project exists.
    pub async fn require(&self, id: i32) -> ServiceResult<()> {
        self.projects.find_by_id(id).await?;
        Ok(())
    }

    #[instrument(skip(self, valid), fields(name = %valid.name))]
    pub async fn create(&self, valid: ValidProject) -> ServiceResult<ProjectView> {
        let project = self.projects.create(ProjectDraft::from(valid)).await?;
        tracing::info!(project_id = project.id, "Project created");
        Ok(ProjectView::new(project, Vec::new()))
    }

    pub async fn update(&self, id: i32, valid: ValidProject) -> ServiceResult<ProjectView> {
        let project = self.projects.update(id, ProjectDraft::from(valid)).await?;
        let images = self.images.find_by_project(id).await?;
        Ok(ProjectView::new(project, images))
    }

    /// Delete the project and its image rows, returning the image URLs so the
    /// stored objects can be discarded.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ServiceResult<Vec<String>> {
        let images = self.projects.delete(id).await?;
        tracing::info!(project_id = id, images = images.len(), "Project deleted");
        Ok(images.into_iter().map(|i| i.url).collect())
    }

    /// Attach an already stored image to a project.
    pub async fn add_image(
        &self,
        project_id: i32,
        valid: ValidProjectImage,
        url: String,
    ) -> ServiceResult<ProjectImageView> {
        let image = self
            .images
            .create(ProjectImageDraft {
                project_id,
                url,
                caption: valid.caption,
            })
            .await?;
        Ok(image.into())
    }

    /// Remove an image row, returning it. Images of other projects are
    /// reported as `NotFound`.
    pub async fn remove_image(
        &self,
        project_id: i32,
        image_id: i32,
    ) -> ServiceResult<project_image::Model> {
        let image = self.images.find_by_id(image_id).await?;
        if image.project_id != project_id {
            return Err(ServiceError::NotFound {
                entity: "project image",
                id: image_id,
            });
        }
        self.images.delete(image_id).await?;
        Ok(image)
    }
}
