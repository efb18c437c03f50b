use async_trait::async_trait;
use sea_orm::*;

use super::{ListFilter, RepoError, RepoResult, ToolRepository, name_like};
use crate::entity::{maintenance_note, tool};
use crate::models::tool::ToolDraft;

pub struct SqlToolRepository {
    db: DatabaseConnection,
}

impl SqlToolRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<tool::Entity> {
        let mut select = tool::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(name_like(tool::Column::Name, pattern));
        }
        if let Some(status) = filter.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(tool::Column::Status.eq(status.to_lowercase()));
        }
        if let Some(category_id) = filter.category_id {
            select = select.filter(tool::Column::CategoryId.eq(category_id));
        }
        if let Some(provider_id) = filter.provider_id {
            select = select.filter(tool::Column::ProviderId.eq(provider_id));
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound { entity: "tool", id }
}

#[async_trait]
impl ToolRepository for SqlToolRepository {
    async fn create(&self, draft: ToolDraft) -> RepoResult<tool::Model> {
        let now = chrono::Utc::now();
        let model = tool::ActiveModel {
            name: Set(draft.name),
            description: Set(draft.description),
            status: Set(draft.status),
            category_id: Set(draft.category_id),
            provider_id: Set(draft.provider_id),
            image_url: Set(draft.image_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<tool::Model> {
        tool::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<tool::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(tool::Column::Name)
            .order_by_asc(tool::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: ToolDraft) -> RepoResult<tool::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: tool::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.status = Set(draft.status);
        active.category_id = Set(draft.category_id);
        active.provider_id = Set(draft.provider_id);
        active.image_url = Set(draft.image_url);
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<u64> {
        let txn = self.db.begin().await?;

        let notes = maintenance_note::Entity::delete_many()
            .filter(maintenance_note::Column::ToolId.eq(id))
            .exec(&txn)
            .await?;
        let result = tool::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }

        txn.commit().await?;
        Ok(notes.rows_affected)
    }
}
