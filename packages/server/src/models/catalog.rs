use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shared::Pagination;
use crate::entity::{category, provider};

#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct CategoryForm {
    pub id: Option<i32>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 80, message = "Name must be 1-80 characters")
    )]
    #[schema(example = "Power tools")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidCategory {
    pub id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CategoryView {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Power tools")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<category::Model> for CategoryView {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryListResponse {
    pub data: Vec<CategoryView>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct ProviderForm {
    pub id: Option<i32>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 120, message = "Name must be 1-120 characters")
    )]
    #[schema(example = "Acme Electric Supply")]
    pub name: Option<String>,
    #[validate(length(max = 120, message = "Contact name must be at most 120 characters"))]
    pub contact_name: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Email is not a valid address"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProvider {
    pub id: Option<i32>,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderDraft {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<ValidProvider> for ProviderDraft {
    fn from(v: ValidProvider) -> Self {
        Self {
            name: v.name,
            contact_name: v.contact_name,
            phone: v.phone,
            email: v.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProviderView {
    #[schema(example = 7)]
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<provider::Model> for ProviderView {
    fn from(m: provider::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            contact_name: m.contact_name,
            phone: m.phone,
            email: m.email,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProviderListResponse {
    pub data: Vec<ProviderView>,
    pub pagination: Pagination,
}
