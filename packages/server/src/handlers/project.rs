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
use crate::extractors::json::AppJson;
use crate::extractors::multipart::AppMultipart;
use crate::models::project::{
    ProjectForm, ProjectImageMultipart, ProjectImageView, ProjectListResponse, ProjectView,
};
use crate::models::shared::ListQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects",
    description = "Paginated project list; each project carries its image gallery.",
    params(ListQuery),
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_projects(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let page = state.projects.list(&query).await?;
    Ok(Json(ProjectListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectView>, AppError> {
    Ok(Json(state.projects.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    params(RedirectQuery),
    request_body = ProjectForm,
    responses(
        (status = 201, description = "Project created", body = ProjectView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn create_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<ProjectForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.projects.create(form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Update a project",
    params(("id" = i32, Path, description = "Project ID"), RedirectQuery),
    request_body = ProjectForm,
    responses(
        (status = 200, description = "Project updated", body = ProjectView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(mut form): AppJson<ProjectForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    form.id = Some(id);
    let view = state.projects.update(form).await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    description = "Removes the project, its gallery rows and the stored image files.",
    params(("id" = i32, Path, description = "Project ID"), RedirectQuery),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.projects.delete(id).await?;
    Ok(outcome.no_content())
}

#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/images",
    tag = "Projects",
    operation_id = "addProjectImage",
    summary = "Add an image to a project",
    description = "Multipart form with a required `image` file and an optional `caption`.",
    params(("id" = i32, Path, description = "Project ID"), RedirectQuery),
    request_body(content = ProjectImageMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image added", body = ProjectImageView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn add_project_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppMultipart(form): AppMultipart<ProjectImageMultipart>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let (form, image) = form.into_parts();
    let view = state.projects.add_image(id, form, image).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}/images/{image_id}",
    tag = "Projects",
    operation_id = "removeProjectImage",
    summary = "Remove an image from a project",
    params(
        ("id" = i32, Path, description = "Project ID"),
        ("image_id" = i32, Path, description = "Image ID"),
        RedirectQuery,
    ),
    responses(
        (status = 204, description = "Image removed"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Project or image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn remove_project_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, image_id)): Path<(i32, i32)>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.projects.remove_image(id, image_id).await?;
    Ok(outcome.no_content())
}
