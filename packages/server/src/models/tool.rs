use std::fmt;
use std::str::FromStr;

use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shared::{Pagination, image_upload};
use crate::services::image::ImageUpload;

/// Lifecycle of a tool in the workshop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Available,
    InUse,
    Maintenance,
    Retired,
}

impl ToolStatus {
    pub const ALL: [ToolStatus; 4] = [
        ToolStatus::Available,
        ToolStatus::InUse,
        ToolStatus::Maintenance,
        ToolStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Available => "available",
            ToolStatus::InUse => "in_use",
            ToolStatus::Maintenance => "maintenance",
            ToolStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown tool status '{s}'"))
    }
}

/// Raw tool fields as submitted, before validation.
#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct ToolForm {
    /// Must be absent on create and present on update.
    pub id: Option<i32>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 120, message = "Name must be 1-120 characters")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(required(message = "Status is required"))]
    #[schema(example = "available")]
    pub status: Option<String>,
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
}

/// Multipart body for creating or updating a tool.
#[derive(Debug, TryFromMultipart, utoipa::ToSchema)]
pub struct ToolMultipart {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i32>,
    pub provider_id: Option<i32>,
    /// Optional picture of the tool.
    #[form_data(limit = "10MiB")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<FieldData<Bytes>>,
}

impl ToolMultipart {
    pub fn into_parts(self, id: Option<i32>) -> (ToolForm, Option<ImageUpload>) {
        let form = ToolForm {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            category_id: self.category_id,
            provider_id: self.provider_id,
        };
        (form, image_upload(self.image))
    }
}

/// Tool fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTool {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub status: ToolStatus,
    pub category_id: i32,
    pub provider_id: i32,
}

/// Column values written by the tool repository.
#[derive(Debug, Clone)]
pub struct ToolDraft {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub category_id: i32,
    pub provider_id: i32,
    pub image_url: Option<String>,
}

impl ToolDraft {
    pub fn new(valid: ValidTool, image_url: Option<String>) -> Self {
        Self {
            name: valid.name,
            description: valid.description,
            status: valid.status.as_str().to_string(),
            category_id: valid.category_id,
            provider_id: valid.provider_id,
            image_url,
        }
    }
}

/// Tool enriched with category and provider names and its note count.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ToolView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Cordless drill")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "available")]
    pub status: String,
    pub category_id: i32,
    /// Category name, null when the category no longer exists.
    #[schema(example = "Power tools")]
    pub category: Option<String>,
    pub provider_id: i32,
    /// Provider name, null when the provider no longer exists.
    pub provider: Option<String>,
    pub image_url: Option<String>,
    /// Number of maintenance notes recorded for the tool.
    #[schema(example = 2)]
    pub maintenance_notes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ToolListResponse {
    pub data: Vec<ToolView>,
    pub pagination: Pagination,
}
