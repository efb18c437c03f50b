use async_trait::async_trait;
use sea_orm::*;

use super::{ListFilter, MaterialRepository, RepoError, RepoResult, name_like};
use crate::entity::material;
use crate::models::material::MaterialDraft;

pub struct SqlMaterialRepository {
    db: DatabaseConnection,
}

impl SqlMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select(filter: &ListFilter) -> Select<material::Entity> {
        let mut select = material::Entity::find();
        if let Some(pattern) = filter.search_pattern() {
            select = select.filter(name_like(material::Column::Name, pattern));
        }
        if let Some(active) = filter.active() {
            select = select.filter(material::Column::Status.eq(active));
        }
        if let Some(category_id) = filter.category_id {
            select = select.filter(material::Column::CategoryId.eq(category_id));
        }
        if let Some(provider_id) = filter.provider_id {
            select = select.filter(material::Column::ProviderId.eq(provider_id));
        }
        select
    }
}

fn not_found(id: i32) -> RepoError {
    RepoError::NotFound {
        entity: "material",
        id,
    }
}

#[async_trait]
impl MaterialRepository for SqlMaterialRepository {
    async fn create(&self, draft: MaterialDraft) -> RepoResult<material::Model> {
        let now = chrono::Utc::now();
        let model = material::ActiveModel {
            name: Set(draft.name),
            status: Set(draft.status),
            category_id: Set(draft.category_id),
            provider_id: Set(draft.provider_id),
            expiration: Set(draft.expiration),
            stock: Set(draft.stock),
            cost: Set(draft.cost),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<material::Model> {
        material::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn find_all(&self, filter: &ListFilter) -> RepoResult<Vec<material::Model>> {
        Ok(Self::select(filter)
            .order_by_asc(material::Column::Name)
            .order_by_asc(material::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await?)
    }

    async fn count(&self, filter: &ListFilter) -> RepoResult<u64> {
        Ok(Self::select(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, draft: MaterialDraft) -> RepoResult<material::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: material::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.status = Set(draft.status);
        active.category_id = Set(draft.category_id);
        active.provider_id = Set(draft.provider_id);
        active.expiration = Set(draft.expiration);
        active.stock = Set(draft.stock);
        active.cost = Set(draft.cost);
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = material::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
