use std::sync::Arc;

use tracing::instrument;

use crate::config::AuthConfig;
use crate::entity::user::{ADMIN_ROLE, DEFAULT_ROLE};
use crate::error::AppError;
use crate::models::user::{
    SessionView, SignInForm, SignUpForm, UserView, ValidSignIn, ValidSignUp,
};
use crate::services::{ServiceError, UserService};
use crate::utils::{hash, jwt};
use crate::validation::{Mode, Validator};

/// Account registration and sign-in.
pub struct SignUpController {
    users: Arc<UserService>,
    validator: Arc<dyn Validator<SignUpForm, Valid = ValidSignUp>>,
    sign_in_validator: Arc<dyn Validator<SignInForm, Valid = ValidSignIn>>,
    auth: AuthConfig,
}

impl SignUpController {
    pub fn new(
        users: Arc<UserService>,
        validator: Arc<dyn Validator<SignUpForm, Valid = ValidSignUp>>,
        sign_in_validator: Arc<dyn Validator<SignInForm, Valid = ValidSignIn>>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            users,
            validator,
            sign_in_validator,
            auth,
        }
    }

    #[instrument(skip_all, fields(email = ?form.email))]
    pub async fn sign_up(&self, form: SignUpForm) -> Result<UserView, AppError> {
        let valid = self.validator.validate(&form, Mode::Create)?;
        if self.users.email_taken(&valid.email).await? {
            return Err(AppError::Conflict("Email is already registered".into()));
        }

        let password_hash = hash::hash_password(&valid.password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        let role = if self.auth.is_admin_email(&valid.email) {
            ADMIN_ROLE
        } else {
            DEFAULT_ROLE
        };

        self.users
            .register(valid, role, password_hash)
            .await
            .map_err(|e| match e {
                ServiceError::Conflict(_) => {
                    tracing::debug!("Registration race condition: unique constraint caught on insert");
                    AppError::Conflict("Email is already registered".into())
                }
                other => AppError::from(other),
            })
    }

    #[instrument(skip_all, fields(email = ?form.email))]
    pub async fn sign_in(&self, form: SignInForm) -> Result<SessionView, AppError> {
        let valid = self.sign_in_validator.validate(&form, Mode::Create)?;
        let user = self
            .users
            .find_credentials(&valid.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let is_valid = hash::verify_password(&valid.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = jwt::sign(
            user.id,
            &user.email,
            &user.role,
            &self.auth.jwt_secret,
            self.auth.token_ttl_hours,
        )
        .map_err(|e| AppError::Internal(format!("Token signing error: {}", e)))?;

        tracing::info!(user_id = user.id, "User signed in");
        Ok(SessionView {
            token,
            user: user.into(),
        })
    }
}
