use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;

use super::{ServiceError, ServiceResult};
use crate::models::catalog::{
    CategoryDraft, CategoryView, ProviderDraft, ProviderView, ValidCategory, ValidProvider,
};
use crate::models::shared::Page;
use crate::repository::{CategoryRepository, ListFilter, ProviderRepository, RepoError};

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<CategoryView>> {
        let (rows, total) = tokio::try_join!(self.repo.find_all(filter), self.repo.count(filter))?;
        Ok(Page {
            items: rows.into_iter().map(CategoryView::from).collect(),
            total,
        })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<CategoryView> {
        Ok(self.repo.find_by_id(id).await?.into())
    }

    #[instrument(skip(self, valid), fields(name = %valid.name))]
    pub async fn create(&self, valid: ValidCategory) -> ServiceResult<CategoryView> {
        let name = valid.name.clone();
        let model = self
            .repo
            .create(CategoryDraft { name: valid.name })
            .await
            .map_err(|e| name_taken(e, &name))?;
        tracing::info!(category_id = model.id, "Category created");
        Ok(model.into())
    }

    pub async fn update(&self, id: i32, valid: ValidCategory) -> ServiceResult<CategoryView> {
        let name = valid.name.clone();
        let model = self
            .repo
            .update(id, CategoryDraft { name: valid.name })
            .await
            .map_err(|e| name_taken(e, &name))?;
        Ok(model.into())
    }

    /// Tools and materials keep their `category_id`; their category name
    /// renders as null afterwards.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(category_id = id, "Category deleted");
        Ok(())
    }

    /// Fail with `NotFound` unless the category exists.
    pub async fn require(&self, id: i32) -> ServiceResult<()> {
        self.repo.find_by_id(id).await?;
        Ok(())
    }

    pub async fn names(&self, ids: &[i32]) -> ServiceResult<HashMap<i32, String>> {
        let rows = self.repo.find_by_ids(ids).await?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

pub struct ProviderService {
    repo: Arc<dyn ProviderRepository>,
}

impl ProviderService {
    pub fn new(repo: Arc<dyn ProviderRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &ListFilter) -> ServiceResult<Page<ProviderView>> {
        let (rows, total) = tokio::try_join!(self.repo.find_all(filter), self.repo.count(filter))?;
        Ok(Page {
            items: rows.into_iter().map(ProviderView::from).collect(),
            total,
        })
    }

    pub async fn get(&self, id: i32) -> ServiceResult<ProviderView> {
        Ok(self.repo.find_by_id(id).await?.into())
    }

    #[instrument(skip(self, valid), fields(name = %valid.name))]
    pub async fn create(&self, valid: ValidProvider) -> ServiceResult<ProviderView> {
        let model = self.repo.create(ProviderDraft::from(valid)).await?;
        tracing::info!(provider_id = model.id, "Provider created");
        Ok(model.into())
    }

    pub async fn update(&self, id: i32, valid: ValidProvider) -> ServiceResult<ProviderView> {
        let model = self.repo.update(id, ProviderDraft::from(valid)).await?;
        Ok(model.into())
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(provider_id = id, "Provider deleted");
        Ok(())
    }

    pub async fn require(&self, id: i32) -> ServiceResult<()> {
        self.repo.find_by_id(id).await?;
        Ok(())
    }

    pub async fn names(&self, ids: &[i32]) -> ServiceResult<HashMap<i32, String>> {
        let rows = self.repo.find_by_ids(ids).await?;
        Ok(rows.into_iter().map(|p| (p.id, p.name)).collect())
    }
}

fn name_taken(err: RepoError, name: &str) -> ServiceError {
    match err {
        RepoError::Conflict(_) => {
            ServiceError::Conflict(format!("Category \"{name}\" already exists"))
        }
        other => other.into(),
    }
}
