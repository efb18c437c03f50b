use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role given to every account not listed in `auth.admin_emails`.
pub const DEFAULT_ROLE: &str = "staff";
pub const ADMIN_ROLE: &str = "admin";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub avatar_url: Option<String>,

    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
