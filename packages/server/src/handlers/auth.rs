use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::instrument;

use super::outcome::{Flash, RedirectQuery};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::user::{SessionView, SignInForm, SignUpForm, UserView};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    tag = "Auth",
    operation_id = "signUp",
    summary = "Register a new account",
    description = "Creates a staff account. Emails listed in `auth.admin_emails` are registered as administrators.",
    params(RedirectQuery),
    request_body = SignUpForm,
    responses(
        (status = 201, description = "Account created", body = UserView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, redirect, form))]
pub async fn sign_up(
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<SignUpForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.sign_up.sign_up(form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    tag = "Auth",
    operation_id = "signIn",
    summary = "Sign in",
    description = "Exchanges email and password for a bearer token.",
    request_body = SignInForm,
    responses(
        (status = 200, description = "Signed in", body = SessionView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong email or password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(form): AppJson<SignInForm>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sign_up.sign_in(form).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    operation_id = "getMe",
    summary = "Get the current user",
    responses(
        (status = 200, description = "Signed-in user", body = UserView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Account no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserView>, AppError> {
    let actor = auth_user.actor();
    Ok(Json(state.users.get(&actor, actor.user_id).await?))
}
