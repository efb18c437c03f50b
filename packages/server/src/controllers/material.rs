use std::sync::Arc;

use tracing::instrument;

use super::update_id;
use crate::error::AppError;
use crate::models::material::{MaterialForm, MaterialView, ValidMaterial};
use crate::models::shared::{ListQuery, Page};
use crate::services::{CategoryService, MaterialService, ProviderService};
use crate::validation::{Mode, Validator};

pub struct MaterialController {
    validator: Arc<dyn Validator<MaterialForm, Valid = ValidMaterial>>,
    categories: Arc<CategoryService>,
    providers: Arc<ProviderService>,
    materials: Arc<MaterialService>,
}

impl MaterialController {
    pub fn new(
        validator: Arc<dyn Validator<MaterialForm, Valid = ValidMaterial>>,
        categories: Arc<CategoryService>,
        providers: Arc<ProviderService>,
        materials: Arc<MaterialService>,
    ) -> Self {
        Self {
            validator,
            categories,
            providers,
            materials,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<MaterialView>, AppError> {
        Ok(self.materials.list(&query.filter()?).await?)
    }

    pub async fn get(&self, id: i32) -> Result<MaterialView, AppError> {
        Ok(self.materials.get(id).await?)
    }

    #[instrument(skip_all, fields(name = ?form.name))]
    pub async fn create(&self, form: MaterialForm) -> Result<MaterialView, AppError> {
        let valid = self.validator.validate(&form, Mode::Create)?;
        self.check_references(&valid).await?;
        Ok(self.materials.create(valid).await?)
    }

    #[instrument(skip_all, fields(id = ?form.id))]
    pub async fn update(&self, form: MaterialForm) -> Result<MaterialView, AppError> {
        let valid = self.validator.validate(&form, Mode::Update)?;
        let id = update_id(valid.id)?;
        self.check_references(&valid).await?;
        Ok(self.materials.update(id, valid).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        Ok(self.materials.delete(id).await?)
    }

    async fn check_references(&self, valid: &ValidMaterial) -> Result<(), AppError> {
        tokio::try_join!(
            self.categories.require(valid.category_id),
            self.providers.require(valid.provider_id),
        )?;
        Ok(())
    }
}
