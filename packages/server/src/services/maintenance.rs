use std::collections::HashMap;
use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::models::maintenance::{NoteDraft, NoteView, ValidNote};
use crate::repository::MaintenanceNoteRepository;

pub struct MaintenanceNoteService {
    repo: Arc<dyn MaintenanceNoteRepository>,
}

impl MaintenanceNoteService {
    pub fn new(repo: Arc<dyn MaintenanceNoteRepository>) -> Self {
        Self { repo }
    }

    /// The caller is responsible for checking that the tool exists.
    pub async fn add(&self, tool_id: i32, valid: ValidNote) -> ServiceResult<NoteView> {
        let model = self
            .repo
            .create(NoteDraft {
                tool_id,
                note: valid.note,
            })
            .await?;
        Ok(model.into())
    }

    pub async fn list_for_tool(&self, tool_id: i32) -> ServiceResult<Vec<NoteView>> {
        let rows = self.repo.find_by_tool(tool_id).await?;
        Ok(rows.into_iter().map(NoteView::from).collect())
    }

    pub async fn count_by_tools(&self, tool_ids: &[i32]) -> ServiceResult<HashMap<i32, u64>> {
        Ok(self.repo.count_by_tools(tool_ids).await?)
    }

    /// Delete a note, reporting `NotFound` when it belongs to another tool.
    pub async fn delete(&self, tool_id: i32, note_id: i32) -> ServiceResult<()> {
        let note = self.repo.find_by_id(note_id).await?;
        if note.tool_id != tool_id {
            return Err(ServiceError::NotFound {
                entity: "maintenance note",
                id: note_id,
            });
        }
        self.repo.delete(note_id).await?;
        Ok(())
    }
}
