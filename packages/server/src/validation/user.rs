use validator::Validate;

use super::{Errors, Mode, ValidationFailure, Validator};
use crate::models::shared::clean;
use crate::models::user::{
    ProfileForm, SignInForm, SignUpForm, ValidProfile, ValidSignIn, ValidSignUp,
};

pub struct SignUpValidator;

impl Validator<SignUpForm> for SignUpValidator {
    type Valid = ValidSignUp;

    fn validate(&self, payload: &SignUpForm, _mode: Mode) -> Result<ValidSignUp, ValidationFailure> {
        // Passwords are taken verbatim.
        let form = SignUpForm {
            email: clean(&payload.email).map(|e| e.to_lowercase()),
            full_name: clean(&payload.full_name),
            phone: clean(&payload.phone),
            password: payload.password.clone().filter(|p| !p.is_empty()),
            password_confirmation: payload.password_confirmation.clone(),
        };

        let mut errors = Errors::new();
        errors.absorb(form.validate());
        if form.password.is_some() && form.password_confirmation != form.password {
            errors.push("password_confirmation", "Passwords do not match");
        }
        errors.finish()?;

        Ok(ValidSignUp {
            email: form.email.unwrap_or_default(),
            full_name: form.full_name.unwrap_or_default(),
            phone: form.phone,
            password: form.password.unwrap_or_default(),
        })
    }
}

pub struct SignInValidator;

impl Validator<SignInForm> for SignInValidator {
    type Valid = ValidSignIn;

    fn validate(&self, payload: &SignInForm, _mode: Mode) -> Result<ValidSignIn, ValidationFailure> {
        let form = SignInForm {
            email: clean(&payload.email).map(|e| e.to_lowercase()),
            password: payload.password.clone().filter(|p| !p.is_empty()),
        };
        let mut errors = Errors::new();
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidSignIn {
            email: form.email.unwrap_or_default(),
            password: form.password.unwrap_or_default(),
        })
    }
}

pub struct ProfileValidator;

impl Validator<ProfileForm> for ProfileValidator {
    type Valid = ValidProfile;

    fn validate(&self, payload: &ProfileForm, mode: Mode) -> Result<ValidProfile, ValidationFailure> {
        let form = ProfileForm {
            id: payload.id,
            full_name: clean(&payload.full_name),
            phone: clean(&payload.phone),
        };
        let mut errors = Errors::new();
        errors.check_mode(form.id, mode);
        errors.absorb(form.validate());
        errors.finish()?;

        Ok(ValidProfile {
            id: form.id,
            full_name: form.full_name.unwrap_or_default(),
            phone: form.phone,
        })
    }
}
