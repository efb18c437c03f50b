use validator::Validate;

use super::{Errors, Mode, ValidationFailure, Validator};
use crate::models::project::{ProjectForm, ProjectImageForm, ValidProject, ValidProjectImage};
use crate::models::shared::clean;

pub struct ProjectValidator;

impl Validator<ProjectForm> for ProjectValidator {
    type Valid = ValidProject;

    fn validate(&self, payload: &ProjectForm, mode: Mode) -> Result<ValidProject, ValidationFailure> {
        let form = ProjectForm {
            id: payload.id,
            name: clean(&payload.name),
            description: clean(&payload.description),
            client: clean(&payload.client),
            location: clean(&payload.location),
        };
        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidProject {
            id: form.id,
            name: form.name.unwrap_or_default(),
            description: form.description,
            client: form.client,
            location: form.location,
        })
    }
}

pub struct ProjectImageValidator;

impl Validator<ProjectImageForm> for ProjectImageValidator {
    type Valid = ValidProjectImage;

    fn validate(
        &self,
        payload: &ProjectImageForm,
        _mode: Mode,
    ) -> Result<ValidProjectImage, ValidationFailure> {
        let form = ProjectImageForm {
            caption: clean(&payload.caption),
        };
        let mut errors = Errors::new();
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidProjectImage {
            caption: form.caption,
        })
    }
}
