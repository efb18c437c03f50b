//! Validation services.
//!
//! A [`Validator`] turns a raw form into its validated counterpart or a list of
//! every field that failed. Validators are pure: they never touch storage, the
//! object store or the network.

mod catalog;
mod material;
mod project;
mod tool;
mod user;

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub use catalog::{CategoryValidator, ProviderValidator};
pub use material::MaterialValidator;
pub use project::{ProjectImageValidator, ProjectValidator};
pub use tool::{MaintenanceNoteValidator, ToolValidator};
pub use user::{ProfileValidator, SignInValidator, SignUpValidator};

/// Whether a payload describes a new record or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    #[schema(example = "name")]
    pub field: String,
    #[schema(example = "Name is required")]
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Every field error found in a payload, ordered by field name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed on {} field(s)", .0.len())]
pub struct ValidationFailure(pub Vec<FieldError>);

impl ValidationFailure {
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

pub trait Validator<P>: Send + Sync {
    type Valid;

    fn validate(&self, payload: &P, mode: Mode) -> Result<Self::Valid, ValidationFailure>;
}

/// Accumulates field errors from rule checks and the `validator` derive.
#[derive(Debug, Default)]
pub(crate) struct Errors(Vec<FieldError>);

impl Errors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.0.push(FieldError::new(field, reason));
    }

    /// Merge the result of a derived `validate()` call.
    pub(crate) fn absorb(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };
        for (field, list) in errors.field_errors() {
            for error in list {
                let reason = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.0.push(FieldError::new(field.to_string(), reason));
            }
        }
    }

    /// `id` must be absent when creating and present when updating.
    pub(crate) fn check_mode(&mut self, id: Option<i32>, mode: Mode) {
        match (mode, id) {
            (Mode::Create, Some(_)) => self.push("id", "Id must not be set when creating"),
            (Mode::Update, None) => self.push("id", "Id is required when updating"),
            (Mode::Update, Some(id)) if id < 1 => self.push("id", "Id must be positive"),
            _ => {}
        }
    }

    /// Ok when nothing was recorded.
    pub(crate) fn finish(mut self) -> Result<(), ValidationFailure> {
        if self.0.is_empty() {
            return Ok(());
        }
        self.0.sort_by(|a, b| a.field.cmp(&b.field));
        Err(ValidationFailure(self.0))
    }
}
