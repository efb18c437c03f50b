use validator::Validate;

use super::{Errors, Mode, ValidationFailure, Validator};
use crate::models::catalog::{CategoryForm, ProviderForm, ValidCategory, ValidProvider};
use crate::models::shared::clean;

pub struct CategoryValidator;

impl Validator<CategoryForm> for CategoryValidator {
    type Valid = ValidCategory;

    fn validate(
        &self,
        payload: &CategoryForm,
        mode: Mode,
    ) -> Result<ValidCategory, ValidationFailure> {
        let form = CategoryForm {
            id: payload.id,
            name: clean(&payload.name),
        };
        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidCategory {
            id: form.id,
            name: form.name.unwrap_or_default(),
        })
    }
}

pub struct ProviderValidator;

impl Validator<ProviderForm> for ProviderValidator {
    type Valid = ValidProvider;

    fn validate(
        &self,
        payload: &ProviderForm,
        mode: Mode,
    ) -> Result<ValidProvider, ValidationFailure> {
        let form = ProviderForm {
            id: payload.id,
            name: clean(&payload.name),
            contact_name: clean(&payload.contact_name),
            phone: clean(&payload.phone),
            email: clean(&payload.email).map(|e| e.to_lowercase()),
        };
        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidProvider {
            id: form.id,
            name: form.name.unwrap_or_default(),
            contact_name: form.contact_name,
            phone: form.phone,
            email: form.email,
        })
    }
}
