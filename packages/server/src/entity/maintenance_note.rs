use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_note")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub tool_id: i32,

    #[sea_orm(column_type = "Text")]
    pub note: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
