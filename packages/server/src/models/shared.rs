use axum::body::Bytes;
use axum_typed_multipart::FieldData;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::repository::ListFilter;
use crate::services::image::ImageUpload;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// One page of results plus the unpaged total.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Query parameters shared by every list endpoint.
///
/// `status`, `category_id` and `provider_id` are ignored by resources that
/// have no such column.
#[derive(Debug, Default, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (1-indexed).
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Items per page (1-100, default 20).
    #[param(example = 20)]
    pub per_page: Option<u64>,
    /// Case-insensitive substring match on the name.
    #[param(example = "drill")]
    pub search: Option<String>,
    /// Tool status, or `active` / `inactive` for materials.
    #[param(example = "available")]
    pub status: Option<String>,
    pub category_id: Option<i32>,
    pub provider_id: Option<i32>,
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        Ord::max(self.page.unwrap_or(1), 1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Repository filter for the requested page.
    ///
    /// Fails when the page lies beyond what the database can address as an
    /// offset (a signed 64-bit integer).
    pub fn filter(&self) -> Result<ListFilter, AppError> {
        let per_page = self.per_page();
        let offset = (self.page() - 1)
            .checked_mul(per_page)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or_else(|| AppError::Validation("page is out of range".into()))?;
        Ok(ListFilter {
            search: self.search.clone(),
            status: self.status.clone(),
            category_id: self.category_id,
            provider_id: self.provider_id,
            offset: Some(offset),
            limit: Some(per_page),
        })
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        let per_page = self.per_page();
        Pagination {
            page: self.page(),
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trim a free-text field, folding blank input to `None`.
pub fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Turn an optional multipart file field into an upload.
///
/// Browsers send an empty, unnamed part when a file input is left blank;
/// that is treated as "no file".
pub fn image_upload(field: Option<FieldData<Bytes>>) -> Option<ImageUpload> {
    let field = field?;
    let file_name = field.metadata.file_name.filter(|n| !n.is_empty());
    if field.contents.is_empty() && file_name.is_none() {
        return None;
    }
    Some(ImageUpload {
        file_name,
        content_type: field.metadata.content_type,
        bytes: field.contents,
    })
}
