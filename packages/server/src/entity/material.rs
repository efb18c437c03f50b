use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// Active (true) or inactive (false).
    pub status: bool,

    pub category_id: i32,
    pub provider_id: i32,

    /// NULL for materials that do not expire.
    pub expiration: Option<Date>,
    pub stock: i32,
    pub cost: f64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
