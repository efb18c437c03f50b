use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shared::{Pagination, image_upload};
use crate::entity::{project, project_image};
use crate::services::image::ImageUpload;

#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct ProjectForm {
    pub id: Option<i32>,
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 120, message = "Name must be 1-120 characters")
    )]
    #[schema(example = "Warehouse rewiring")]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 120, message = "Client must be at most 120 characters"))]
    pub client: Option<String>,
    #[validate(length(max = 120, message = "Location must be at most 120 characters"))]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProject {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
}

impl From<ValidProject> for ProjectDraft {
    fn from(v: ValidProject) -> Self {
        Self {
            name: v.name,
            description: v.description,
            client: v.client,
            location: v.location,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ProjectImageForm {
    #[validate(length(max = 200, message = "Caption must be at most 200 characters"))]
    pub caption: Option<String>,
}

/// Multipart body for `POST /projects/{id}/images`.
#[derive(Debug, TryFromMultipart, utoipa::ToSchema)]
pub struct ProjectImageMultipart {
    pub caption: Option<String>,
    #[form_data(limit = "10MiB")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<FieldData<Bytes>>,
}

impl ProjectImageMultipart {
    pub fn into_parts(self) -> (ProjectImageForm, Option<ImageUpload>) {
        let form = ProjectImageForm {
            caption: self.caption,
        };
        (form, image_upload(self.image))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProjectImage {
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectImageDraft {
    pub project_id: i32,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProjectImageView {
    pub id: i32,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<project_image::Model> for ProjectImageView {
    fn from(m: project_image::Model) -> Self {
        Self {
            id: m.id,
            url: m.url,
            caption: m.caption,
            created_at: m.created_at,
        }
    }
}

/// Project together with its gallery.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ProjectView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Warehouse rewiring")]
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub images: Vec<ProjectImageView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectView {
    pub fn new(m: project::Model, images: Vec<project_image::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            client: m.client,
            location: m.location,
            images: images.into_iter().map(ProjectImageView::from).collect(),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectView>,
    pub pagination: Pagination,
}
