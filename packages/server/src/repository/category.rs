use async_trait::async_trait;
use sea_orm::*;

use super::{CategoryRepository, ListFilter, RepoError, RepoResult, name_like};
use crate::entity::category;
use crate::models::catalog::CategoryDraft;

pub struct SqlCategoryRepository {
    db: DatabaseConnection,
}

impl SqlCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<category::Entity> {
        let mut select = category::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(name_like(category::Column::Name, pattern));
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound {
        entity: "category",
        id,
    }
}

#[async_trait]
impl CategoryRepository for SqlCategoryRepository {
    async fn create(&self, draft: CategoryDraft) -> RepoResult<category::Model> {
        let model = category::ActiveModel {
            name: Set(draft.name),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<category::Model> {
        category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> RepoResult<Vec<category::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(category::Entity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<category::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(category::Column::Name)
            .order_by_asc(category::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: CategoryDraft) -> RepoResult<category::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(draft.name);
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = category::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
