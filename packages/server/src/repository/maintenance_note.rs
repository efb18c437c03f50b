use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::*;

use super::{MaintenanceNoteRepository, RepoError, RepoResult};
use crate::entity::maintenance_note;
use crate::models::maintenance::NoteDraft;

pub struct SqlMaintenanceNoteRepository {
    db: DatabaseConnection,
}

impl SqlMaintenanceNoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceNoteRepository for SqlMaintenanceNoteRepository {
    async fn create(&self, draft: NoteDraft) -> RepoResult<maintenance_note::Model> {
        let model = maintenance_note::ActiveModel {
            tool_id: Set(draft.tool_id),
            note: Set(draft.note),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> RepoResult<maintenance_note::Model> {
        maintenance_note::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "maintenance note",
                id,
            })
    }

    async fn find_by_tool(&self, tool_id: i32) -> RepoResult<Vec<maintenance_note::Model>> {
        Ok(maintenance_note::Entity::find()
            .filter(maintenance_note::Column::ToolId.eq(tool_id))
            .order_by_desc(maintenance_note::Column::CreatedAt)
            .order_by_desc(maintenance_note::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn count_by_tools(&self, tool_ids: &[i32]) -> RepoResult<HashMap<i32, u64>> {
        if tool_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let owners: Vec<i32> = maintenance_note::Entity::find()
            .select_only()
            .column(maintenance_note::Column::ToolId)
            .filter(maintenance_note::Column::ToolId.is_in(tool_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await?;

        let mut counts = HashMap::new();
        for tool_id in owners {
            *counts.entry(tool_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete(&self, id: i32) -> RepoResult<()> {
        let result = maintenance_note::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound {
                entity: "maintenance note",
                id,
            });
        }
        Ok(())
    }
}
