use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shared::Pagination;

/// Raw material fields as submitted, before validation.
#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct MaterialForm {
    /// Must be absent on create and present on update.
    pub id: Option<i32>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 120, message = "Name must be 1-120 characters")
    )]
    #[schema(example = "Cable 10AWG")]
    pub name: Option<String>,
    /// `true` for active materials.
    #[validate(required(message = "Status is required"))]
    pub status: Option<bool>,
    #[validate(
        required(message = "Category is required"),
        range(min = 1, message = "Category id must be positive")
    )]
    pub category_id: Option<i32>,
    #[validate(
        required(message = "Provider is required"),
        range(min = 1, message = "Provider id must be positive")
    )]
    pub provider_id: Option<i32>,
    #[schema(example = "2030-01-31")]
    pub expiration: Option<NaiveDate>,
    #[validate(
        required(message = "Stock is required"),
        range(min = 0, message = "Stock must not be negative")
    )]
    #[schema(example = 100)]
    pub stock: Option<i32>,
    #[validate(
        required(message = "Cost is required"),
        range(min = 0.0, message = "Cost must not be negative")
    )]
    #[schema(example = 12.5)]
    pub cost: Option<f64>,
}

/// Material fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMaterial {
    pub id: Option<i32>,
    pub name: String,
    pub status: bool,
    pub category_id: i32,
    pub provider_id: i32,
    pub expiration: Option<NaiveDate>,
    pub stock: i32,
    pub cost: f64,
}

/// Column values written by the material repository.
#[derive(Debug, Clone)]
pub struct MaterialDraft {
    pub name: String,
    pub status: bool,
    pub category_id: i32,
    pub provider_id: i32,
    pub expiration: Option<NaiveDate>,
    pub stock: i32,
    pub cost: f64,
}

impl From<ValidMaterial> for MaterialDraft {
    fn from(v: ValidMaterial) -> Self {
        Self {
            name: v.name,
            status: v.status,
            category_id: v.category_id,
            provider_id: v.provider_id,
            expiration: v.expiration,
            stock: v.stock,
            cost: v.cost,
        }
    }
}

/// Material enriched with its category and provider names.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MaterialView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Cable 10AWG")]
    pub name: String,
    pub status: bool,
    pub category_id: i32,
    /// Category name, null when the category no longer exists.
    pub category: Option<String>,
    pub provider_id: i32,
    /// Provider name, null when the provider no longer exists.
    pub provider: Option<String>,
    pub expiration: Option<NaiveDate>,
    pub stock: i32,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MaterialListResponse {
    pub data: Vec<MaterialView>,
    pub pagination: Pagination,
}
