use async_trait::async_trait;
use sea_orm::*;

use super::{ListFilter, ProjectRepository, RepoError, RepoResult, name_like};
use crate::entity::{project, project_image};
use crate::models::project::ProjectDraft;

pub struct SqlProjectRepository {
    db: DatabaseConnection,
}

impl SqlProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<project::Entity> {
        let mut select = project::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(name_like(project::Column::Name, pattern));
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound {
        entity: "project",
        id,
    }
}

#[async_trait]
impl ProjectRepository for SqlProjectRepository {
    async fn create(&self, draft: ProjectDraft) -> RepoResult<project::Model> {
        let now = chrono::Utc::now();
        let model = project::ActiveModel {
            name: Set(draft.name),
            description: Set(draft.description),
            client: Set(draft.client),
            location: Set(draft.location),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<project::Model> {
        project::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<project::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(project::Column::Name)
            .order_by_asc(project::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: ProjectDraft) -> RepoResult<project::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: project::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.client = Set(draft.client);
        active.location = Set(draft.location);
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<Vec<project_image::Model>> {
        let txn = self.db.begin().await?;

        let images = project_image::Entity::find()
            .filter(project_image::Column::ProjectId.eq(id))
            .order_by_asc(project_image::Column::Id)
            .all(&txn)
            .await?;
        project_image::Entity::delete_many()
            .filter(project_image::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        let result = project::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }

        txn.commit().await?;
        Ok(images)
    }
}
