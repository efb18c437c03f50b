use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::shared::{Pagination, image_upload};
use crate::entity::user;
use crate::services::image::ImageUpload;

/// Account registration form.
#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct SignUpForm {
    #[validate(
        required(message = "Email is required"),
        email(message = "Email is not a valid address")
    )]
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[validate(
        required(message = "Full name is required"),
        length(min = 1, max = 120, message = "Full name must be 1-120 characters")
    )]
    #[schema(example = "Ana Torres")]
    pub full_name: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(
        required(message = "Password is required"),
        length(min = 8, max = 128, message = "Password must be 8-128 characters")
    )]
    pub password: Option<String>,
    /// Must equal `password`.
    pub password_confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignUp {
    /// Lower-cased.
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct SignInForm {
    #[validate(required(message = "Email is required"))]
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    #[validate(required(message = "Password is required"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignIn {
    pub email: String,
    pub password: String,
}

/// Profile fields a user may change.
#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct ProfileForm {
    pub id: Option<i32>,
    #[validate(
        required(message = "Full name is required"),
        length(min = 1, max = 120, message = "Full name must be 1-120 characters")
    )]
    pub full_name: Option<String>,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// Multipart body for `PUT /users/{id}`.
#[derive(Debug, TryFromMultipart, utoipa::ToSchema)]
pub struct ProfileMultipart {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    #[form_data(limit = "10MiB")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub avatar: Option<FieldData<Bytes>>,
}

impl ProfileMultipart {
    pub fn into_parts(self, id: Option<i32>) -> (ProfileForm, Option<ImageUpload>) {
        let form = ProfileForm {
            id,
            full_name: self.full_name,
            phone: self.phone,
        };
        (form, image_upload(self.avatar))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidProfile {
    pub id: Option<i32>,
    pub full_name: String,
    pub phone: Option<String>,
}

/// Column values for a new account.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub password_hash: String,
}

/// Column values for a profile update. `avatar_url: None` keeps the current avatar.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

/// Public account data; never carries the password hash.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    #[schema(example = "staff")]
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserView {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            full_name: m.full_name,
            phone: m.phone,
            role: m.role,
            avatar_url: m.avatar_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserView>,
    pub pagination: Pagination,
}

/// Bearer token issued by sign-in.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SessionView {
    pub token: String,
    pub user: UserView,
}
