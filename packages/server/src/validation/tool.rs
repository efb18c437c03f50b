use validator::Validate;

use super::{Errors, Mode, ValidationFailure, Validator};
use crate::models::maintenance::{NoteForm, ValidNote};
use crate::models::shared::clean;
use crate::models::tool::{ToolForm, ToolStatus, ValidTool};

pub struct ToolValidator;

impl Validator<ToolForm> for ToolValidator {
    type Valid = ValidTool;

    fn validate(&self, payload: &ToolForm, mode: Mode) -> Result<ValidTool, ValidationFailure> {
        let form = ToolForm {
            id: payload.id,
            name: clean(&payload.name),
            description: clean(&payload.description),
            status: clean(&payload.status).map(|s| s.to_lowercase()),
            category_id: payload.category_id,
            provider_id: payload.provider_id,
        };

        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());

        let status = match form.status.as_deref().map(str::parse::<ToolStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(_)) => {
                errors.push(
                    "status",
                    "Status must be one of: available, in_use, maintenance, retired",
                );
                None
            }
            None => None,
        };
        errors.finish()?;

        Ok(ValidTool {
            id: form.id,
            name: form.name.unwrap_or_default(),
            description: form.description,
            status: status.unwrap_or(ToolStatus::Available),
            category_id: form.category_id.unwrap_or_default(),
            provider_id: form.provider_id.unwrap_or_default(),
        })
    }
}

pub struct MaintenanceNoteValidator;

impl Validator<NoteForm> for MaintenanceNoteValidator {
    type Valid = ValidNote;

    fn validate(&self, payload: &NoteForm, _mode: Mode) -> Result<ValidNote, ValidationFailure> {
        let form = NoteForm {
            note: clean(&payload.note),
        };
        let mut errors = Errors::new();
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidNote {
            note: form.note.unwrap_or_default(),
        })
    }
}
