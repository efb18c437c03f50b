use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::instrument;

use super::outcome::{Flash, RedirectQuery};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::multipart::AppMultipart;
use crate::models::shared::ListQuery;
use crate::models::user::{ProfileMultipart, UserListResponse, UserView};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List users",
    description = "Administrators only. `search` matches full name or email.",
    params(ListQuery),
    responses(
        (status = 200, description = "List of users", body = UserListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an administrator (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserListResponse>, AppError> {
    let page = state.users.list(&auth_user.actor(), &query).await?;
    Ok(Json(UserListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Another user's account (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(state.users.get(&auth_user.actor(), id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "updateUser",
    summary = "Update a profile",
    description = "Multipart form. A new `avatar` replaces the stored one; without it the current avatar is kept.",
    params(("id" = i32, Path, description = "User ID"), RedirectQuery),
    request_body(content = ProfileMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile updated", body = UserView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Another user's account (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Avatar could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppMultipart(form): AppMultipart<ProfileMultipart>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    let (form, avatar) = form.into_parts(Some(id));
    let view = state
        .users
        .update_profile(&auth_user.actor(), form, avatar)
        .await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    operation_id = "deleteUser",
    summary = "Delete a user",
    description = "Administrators only. An administrator cannot delete their own account.",
    params(("id" = i32, Path, description = "User ID"), RedirectQuery),
    responses(
        (status = 204, description = "User deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 400, description = "Own account (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not an administrator (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.users.delete(&auth_user.actor(), id).await?;
    Ok(outcome.no_content())
}
