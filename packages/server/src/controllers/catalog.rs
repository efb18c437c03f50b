use std::sync::Arc;

use tracing::instrument;

use super::update_id;
use crate::error::AppError;
use crate::models::catalog::{
    CategoryForm, CategoryView, ProviderForm, ProviderView, ValidCategory, ValidProvider,
};
use crate::models::shared::{ListQuery, Page};
use crate::services::{CategoryService, ProviderService};
use crate::validation::{Mode, Validator};

/// Categories and providers referenced by tools and materials.
pub struct CatalogController {
    category_validator: Arc<dyn Validator<CategoryForm, Valid = ValidCategory>>,
    categories: Arc<CategoryService>,
    provider_validator: Arc<dyn Validator<ProviderForm, Valid = ValidProvider>>,
    providers: Arc<ProviderService>,
}

impl CatalogController {
    pub fn new(
        category_validator: Arc<dyn Validator<CategoryForm, Valid = ValidCategory>>,
        categories: Arc<CategoryService>,
        provider_validator: Arc<dyn Validator<ProviderForm, Valid = ValidProvider>>,
        providers: Arc<ProviderService>,
    ) -> Self {
        Self {
            category_validator,
            categories,
            provider_validator,
            providers,
        }
    }

    pub async fn list_categories(&self, query: &ListQuery) -> Result<Page<CategoryView>, AppError> {
        Ok(self.categories.list(&query.filter()?).await?)
    }

    pub async fn get_category(&self, id: i32) -> Result<CategoryView, AppError> {
        Ok(self.categories.get(id).await?)
    }

    #[instrument(skip_all)]
    pub async fn create_category(&self, form: CategoryForm) -> Result<CategoryView, AppError> {
        let valid = self.category_validator.validate(&form, Mode::Create)?;
        Ok(self.categories.create(valid).await?)
    }

    #[instrument(skip_all, fields(id = ?form.id))]
    pub async fn update_category(&self, form: CategoryForm) -> Result<CategoryView, AppError> {
        let valid = self.category_validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        Ok(self.categories.update(id, valid).await?)
    }

    pub async fn delete_category(&self, id: i32) -> Result<(), AppError> {
        Ok(self.categories.delete(id).await?)
    }

    pub async fn list_providers(&self, query: &ListQuery) -> Result<Page<ProviderView>, AppError> {
        Ok(self.providers.list(&query.filter()?).await?)
    }

    pub async fn get_provider(&self, id: i32) -> Result<ProviderView, AppError> {
        Ok(self.providers.get(id).await?)
    }

    #[instrument(skip_all)]
    pub async fn create_provider(&self, form: ProviderForm) -> Result<ProviderView, AppError> {
        let valid = self.provider_validator.validate(&form, Mode::Create)?;
        Ok(self.providers.create(valid).await?)
    }

    #[instrument(skip_all, fields(id = ?form.id))]
    pub async fn update_provider(&self, form: ProviderForm) -> Result<ProviderView, AppError> {
        let valid = self.provider_validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        Ok(self.providers.update(id, valid).await?)
    }

    pub async fn delete_provider(&self, id: i32) -> Result<(), AppError> {
        Ok(self.providers.delete(id).await?)
    }
}
