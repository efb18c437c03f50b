use std::sync::Arc;

use tracing::instrument;

use super::update_id;
use crate::error::AppError;
use crate::models::maintenance::{NoteForm, NoteView, ValidNote};
use crate::models::shared::{ListQuery, Page};
use crate::models::tool::{ToolForm, ToolView, ValidTool};
use crate::services::image::{ImageUpload, StoredImage};
use crate::services::{
    CategoryService, ImageService, MaintenanceNoteService, ProviderService, ToolService,
};
use crate::validation::{Mode, Validator};

/// Object store prefix for tool pictures.
pub const TOOL_IMAGES: &str = "tools";

pub struct ToolController {
    images: Arc<ImageService>,
    validator: Arc<dyn Validator<ToolForm, Valid = ValidTool>>,
    categories: Arc<CategoryService>,
    providers: Arc<ProviderService>,
    tools: Arc<ToolService>,
    note_validator: Arc<dyn Validator<NoteForm, Valid = ValidNote>>,
    notes: Arc<MaintenanceNoteService>,
}

impl ToolController {
    pub fn new(
        images: Arc<ImageService>,
        validator: Arc<dyn Validator<ToolForm, Valid = ValidTool>>,
        categories: Arc<CategoryService>,
        providers: Arc<ProviderService>,
        tools: Arc<ToolService>,
        note_validator: Arc<dyn Validator<NoteForm, Valid = ValidNote>>,
        notes: Arc<MaintenanceNoteService>,
    ) -> Self {
        Self {
            images,
            validator,
            categories,
            providers,
            tools,
            note_validator,
            notes,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<ToolView>, AppError> {
        Ok(self.tools.list(&query.filter()?).await?)
    }

    pub async fn get(&self, id: i32) -> Result<ToolView, AppError> {
        Ok(self.tools.get(id).await?)
    }

    #[instrument(skip_all, fields(name = ?form.name))]
    pub async fn create(
        &self,
        form: ToolForm,
        image: Option<ImageUpload>,
    ) -> Result<ToolView, AppError> {
        let valid = self.validator.validate(&form, Mode::Create)?;
        self.check_references(&valid).await?;
        let stored = self.store_image(image).await?;
        let image_url = stored.as_ref().map(|s| s.url.clone());

        match self.tools.create(valid, image_url).await {
            Ok(view) => Ok(view),
            Err(e) => {
                self.discard(stored).await;
                Err(e.into())
            }
        }
    }

    #[instrument(skip_all, fields(id = ?form.id))]
    pub async fn update(
        &self,
        form: ToolForm,
        image: Option<ImageUpload>,
    ) -> Result<ToolView, AppError> {
        let valid = self.validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        let existing = self.tools.find(id).await?;
        self.check_references(&valid).await?;
        let stored = self.store_image(image).await?;
        let image_url = stored.as_ref().map(|s| s.url.clone());
        let replaced = stored.is_some();

        let view = match self.tools.update(id, valid, image_url).await {
            Ok(view) => view,
            Err(e) => {
                self.discard(stored).await;
                return Err(e.into());
            }
        };
        if replaced && let Some(old) = existing.image_url {
            self.images.discard(&old).await;
        }
        Ok(view)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let removed = self.tools.delete(id).await?;
        if let Some(url) = removed.image_url {
            self.images.discard(&url).await;
        }
        Ok(())
    }

    #[instrument(skip(self, form))]
    pub async fn add_note(&self, tool_id: i32, form: NoteForm) -> Result<NoteView, AppError> {
        let valid = self.note_validator.validate(&form, Mode::Create)?;
        self.tools.find(tool_id).await?;
        Ok(self.notes.add(tool_id, valid).await?)
    }

    pub async fn list_notes(&self, tool_id: i32) -> Result<Vec<NoteView>, AppError> {
        self.tools.find(tool_id).await?;
        Ok(self.notes.list_for_tool(tool_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_note(&self, tool_id: i32, note_id: i32) -> Result<(), AppError> {
        Ok(self.notes.delete(tool_id, note_id).await?)
    }

    async fn check_references(&self, valid: &ValidTool) -> Result<(), AppError> {
        tokio::try_join!(
            self.categories.require(valid.category_id),
            self.providers.require(valid.provider_id),
        )?;
        Ok(())
    }

    async fn store_image(
        &self,
        image: Option<ImageUpload>,
    ) -> Result<Option<StoredImage>, AppError> {
        match image {
            Some(upload) => Ok(Some(self.images.store(upload, TOOL_IMAGES).await?)),
            None => Ok(None),
        }
    }

    async fn discard(&self, stored: Option<StoredImage>) {
        if let Some(stored) = stored {
            self.images.discard(&stored.url).await;
        }
    }
}
