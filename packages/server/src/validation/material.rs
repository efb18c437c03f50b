use chrono::{NaiveDate, Utc};
use validator::Validate;

use super::{Errors, Mode, ValidationFailure, Validator};
use crate::models::material::{MaterialForm, ValidMaterial};
use crate::models::shared::clean;

/// Material rules. Expiration dates are compared against `today`, which
/// defaults to the current UTC date.
#[derive(Default)]
pub struct MaterialValidator {
    today: Option<NaiveDate>,
}

impl MaterialValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference date.
    pub fn at(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl Validator<MaterialForm> for MaterialValidator {
    type Valid = ValidMaterial;

    fn validate(
        &self,
        payload: &MaterialForm,
        mode: Mode,
    ) -> Result<ValidMaterial, ValidationFailure> {
        let form = MaterialForm {
            name: clean(&payload.name),
            ..payload.clone()
        };

        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());

        if let Some(cost) = form.cost
            && !cost.is_finite()
        {
            errors.push("cost", "Cost must be a finite number");
        }
        if mode == Mode::Create
            && let Some(expiration) = form.expiration
            && expiration < self.today()
        {
            errors.push("expiration", "Expiration date must not be in the past");
        }
        errors.finish()?;

        Ok(ValidMaterial {
            id: form.id,
            name: form.name.unwrap_or_default(),
            status: form.status.unwrap_or_default(),
            category_id: form.category_id.unwrap_or_default(),
            provider_id: form.provider_id.unwrap_or_default(),
            expiration: form.expiration,
            stock: form.stock.unwrap_or_default(),
            cost: form.cost.unwrap_or_default(),
        })
    }
}
