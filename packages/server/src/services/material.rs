use std::sync::Arc;

use tracing::instrument;

use super::{CategoryService, ProviderService, ServiceError, ServiceResult, unique_ids};
use crate::entity::material;
use crate::models::material::{MaterialDraft, MaterialView, ValidMaterial};
use crate::models::shared::Page;
use crate::repository::{ListFilter, MaterialRepository};

pub struct MaterialService {
    materials: Arc<dyn MaterialRepository>,
    categories: Arc<CategoryService>,
    providers: Arc<ProviderService>,
}

impl MaterialService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        categories: Arc<CategoryService>,
        providers: Arc<ProviderService>,
    ) -> Self {
        Self {
            materials,
            categories,
            providers,
        }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<MaterialView>> {
        let (rows, total) = tokio::try_join!(
            self.materials.find_all(filter),
            self.materials.count(filter)
        )?;
        Ok(Page {
            items: self.enrich(rows).await?,
            total,
        })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<MaterialView> {
        let model = self.materials.find_by_id(id).await?;
        self.enrich_one(model).await
    }

    #[instrument(skip(self, valid), fields(name = %valid.name))]
    pub async fn create(&self, valid: ValidMaterial) -> ServiceResult<MaterialView> {
        let model = self.materials.create(MaterialDraft::from(valid)).await?;
        tracing::info!(material_id = model.id, "Material created");
        self.enrich_one(model).await
    }

    #[instrument(skip(self, valid))]
    pub async fn update(&self, id: i32, valid: ValidMaterial) -> ServiceResult<MaterialView> {
        let model = self
            .materials
            .update(id, MaterialDraft::from(valid))
            .await?;
        self.enrich_one(model).await
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        self.materials.delete(id).await?;
        tracing::info!(material_id = id, "Material deleted");
        Ok(())
    }

    async fn enrich_one(&self, model: material::Model) -> ServiceResult<MaterialView> {
        self.enrich(vec![model])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::Persistence("enrichment dropped a row".into()))
    }

    async fn enrich(&self, rows: Vec<material::Model>) -> ServiceResult<Vec<MaterialView>> {
        let category_ids = unique_ids(rows.iter().map(|m| m.category_id));
        let provider_ids = unique_ids(rows.iter().map(|m| m.provider_id));

        let (categories, providers) = tokio::try_join!(
            self.categories.names(&category_ids),
            self.providers.names(&provider_ids),
        )?;

        Ok(rows
            .into_iter()
            .map(|m| MaterialView {
                category: categories.get(&m.category_id).cloned(),
                provider: providers.get(&m.provider_id).cloned(),
                id: m.id,
                name: m.name,
                status: m.status,
                category_id: m.category_id,
                provider_id: m.provider_id,
                expiration: m.expiration,
                stock: m.stock,
                cost: m.cost,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
            .collect())
    }
}
