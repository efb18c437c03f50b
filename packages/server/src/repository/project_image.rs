use async_trait::async_trait;
use sea_orm::*;

use super::{ProjectImageRepository, RepoError, RepoResult};
use crate::entity::project_image;
use crate::models::project::ProjectImageDraft;

pub struct SqlProjectImageRepository {
    db: DatabaseConnection,
}

impl SqlProjectImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectImageRepository for SqlProjectImageRepository {
    async fn create(&self, draft: ProjectImageDraft) -> RepoResult<project_image::Model> {
        let model = project_image::ActiveModel {
            project_id: Set(draft.project_id),
            url: Set(draft.url),
            caption: Set(draft.caption),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<project_image::Model> {
        project_image::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "project image",
                id,
            })
    }

    async fn find_by_project(&self, project_id: i32) -> RepoResult<Vec<project_image::Model>> {
        Ok(project_image::Entity::find()
            .filter(project_image::Column::ProjectId.eq(project_id))
            .order_by_asc(project_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_projects(
        &self,
        project_ids: &[i32],
    ) -> RepoResult<Vec<project_image::Model>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(project_image::Entity::find()
            .filter(project_image::Column::ProjectId.is_in(project_ids.iter().copied()))
            .order_by_asc(project_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = project_image::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound {
                entity: "project image",
                id,
            });
        }
        Ok(())
    }
}
