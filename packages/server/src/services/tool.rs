use std::sync::Arc;

use tracing::instrument;

use super::{
    CategoryService, MaintenanceNoteService, ProviderService, ServiceError, ServiceResult,
    unique_ids,
};
use crate::entity::tool;
use crate::models::shared::Page;
use crate::models::tool::{ToolDraft, ToolView, ValidTool};
use crate::repository::{ListFilter, ToolRepository};

pub struct ToolService {
    tools: Arc<dyn ToolRepository>,
    notes: Arc<MaintenanceNoteService>,
    categories: Arc<CategoryService>,
    providers: Arc<ProviderService>,
}

impl ToolService {
    pub fn new(
        tools: Arc<dyn ToolRepository>,
        notes: Arc<MaintenanceNoteService>,
        categories: Arc<CategoryService>,
        providers: Arc<ProviderService>,
    ) -> Self {
        Self {
            tools,
            notes,
            categories,
            providers,
        }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<ToolView>> {
        let (rows, total) =
            tokio::try_join!(self.tools.find_all(filter), self.tools.count(filter))?;
        Ok(Page {
            items: self.enrich(rows).await?,
            total,
        })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<ToolView> {
        let model = self.tools.find_by_id(id).await?;
        self.enrich_one(model).await
    }

    /// Raw row, for callers that need the stored image URL.
    pub async fn find(&self, id: i32) -> ServiceResult<tool::Model> {
        Ok(self.tools.find_by_id(id).await?)
    }

    #[instrument(skip(self, valid), fields(name = %valid.name))]
    pub async fn create(
        &self,
        valid: ValidTool,
        image_url: Option<String>,
    ) -> ServiceResult<ToolView> {
        let model = self.tools.create(ToolDraft::new(valid, image_url)).await?;
        tracing::info!(tool_id = model.id, "Tool created");
        self.enrich_one(model).await
    }

    /// Replace the tool's fields. `image_url: None` keeps the current image.
    #[instrument(skip(self, valid))]
    pub async fn update(
        &self,
        id: i32,
        valid: ValidTool,
        image_url: Option<String>,
    ) -> ServiceResult<ToolView> {
        let existing = self.tools.find_by_id(id).await?;
        let image_url = image_url.or(existing.image_url);
        let model = self
            .tools
            .update(id, ToolDraft::new(valid, image_url))
            .await?;
        self.enrich_one(model).await
    }

    /// Delete the tool and its maintenance notes, returning the removed row.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ServiceResult<tool::Model> {
        let existing = self.tools.find_by_id(id).await?;
        let notes = self.tools.delete(id).await?;
        tracing::info!(tool_id = id, notes, "Tool deleted");
        Ok(existing)
    }

    async fn enrich_one(&self, model: tool::Model) -> ServiceResult<ToolView> {
        self.enrich(vec![model])
            .await?
            .pop()
            .ok_or_else(|| ServiceError::Persistence("enrichment dropped a row".into()))
    }

    async fn enrich(&self, rows: Vec<tool::Model>) -> ServiceResult<Vec<ToolView>> {
        let category_ids = unique_ids(rows.iter().map(|t| t.category_id));
        let provider_ids = unique_ids(rows.iter().map(|t| t.provider_id));
        let tool_ids: Vec<i32> = rows.iter().map(|t| t.id).collect();

        let (categories, providers, note_counts) = tokio::try_join!(
            self.categories.names(&category_ids),
            self.providers.names(&provider_ids),
            self.notes.count_by_tools(&tool_ids),
        )?;

        Ok(rows
            .into_iter()
            .map(|t| ToolView {
                category: categories.get(&t.category_id).cloned(),
                provider: providers.get(&t.provider_id).cloned(),
                maintenance_notes: note_counts.get(&t.id).copied().unwrap_or(0),
                id: t.id,
                name: t.name,
                description: t.description,
                status: t.status,
                category_id: t.category_id,
                provider_id: t.provider_id,
                image_url: t.image_url,
                created_at: t.created_at,
                updated_at: t.updated_at,
            })
            .collect())
    }
}
