use async_trait::async_trait;
use sea_orm::*;

use super::{ListFilter, ProviderRepository, RepoError, RepoResult, name_like};
use crate::entity::provider;
use crate::models::catalog::ProviderDraft;

pub struct SqlProviderRepository {
    db: DatabaseConnection,
}

impl SqlProviderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<provider::Entity> {
        let mut select = provider::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(name_like(provider::Column::Name, pattern));
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound {
        entity: "provider",
        id,
    }
}

#[async_trait]
impl ProviderRepository for SqlProviderRepository {
    async fn create(&self, draft: ProviderDraft) -> RepoResult<provider::Model> {
        let model = provider::ActiveModel {
            name: Set(draft.name),
            contact_name: Set(draft.contact_name),
            phone: Set(draft.phone),
            email: Set(draft.email),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<provider::Model> {
        provider::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> RepoResult<Vec<provider::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(provider::Entity::find()
            .filter(provider::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<provider::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(provider::Column::Name)
            .order_by_asc(provider::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: ProviderDraft) -> RepoResult<provider::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: provider::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.contact_name = Set(draft.contact_name);
        active.phone = Set(draft.phone);
        active.email = Set(draft.email);
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = provider::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
