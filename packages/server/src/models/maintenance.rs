use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::maintenance_note;

/// Raw maintenance note as submitted.
#[derive(Debug, Default, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct NoteForm {
    #[validate(
        required(message = "Note is required"),
        length(min = 1, max = 2000, message = "Note must be 1-2000 characters")
    )]
    #[schema(example = "Replaced chuck")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidNote {
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub tool_id: i32,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NoteView {
    #[schema(example = 1)]
    pub id: i32,
    pub tool_id: i32,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl From<maintenance_note::Model> for NoteView {
    fn from(m: maintenance_note::Model) -> Self {
        Self {
            id: m.id,
            tool_id: m.tool_id,
            note: m.note,
            created_at: m.created_at,
        }
    }
}
