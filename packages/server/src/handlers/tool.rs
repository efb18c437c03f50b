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
use crate::models::maintenance::{NoteForm, NoteView};
use crate::models::shared::ListQuery;
use crate::models::tool::{ToolListResponse, ToolMultipart, ToolView};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/tools",
    tag = "Tools",
    operation_id = "listTools",
    summary = "List tools",
    description = "Paginated tool list with category/provider names and maintenance note counts. Filters: `search` (name), `status`, `category_id`, `provider_id`.",
    params(ListQuery),
    responses(
        (status = 200, description = "List of tools", body = ToolListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_tools(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ToolListResponse>, AppError> {
    let page = state.tools.list(&query).await?;
    Ok(Json(ToolListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/tools/{id}",
    tag = "Tools",
    operation_id = "getTool",
    summary = "Get a tool",
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Tool", body = ToolView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tool not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_tool(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ToolView>, AppError> {
    Ok(Json(state.tools.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/tools",
    tag = "Tools",
    operation_id = "createTool",
    summary = "Create a tool",
    description = "Multipart form with an optional `image` file. The category and provider must exist; the image is stored before the tool is written.",
    params(RedirectQuery),
    request_body(content = ToolMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Tool created", body = ToolView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category or provider not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn create_tool(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppMultipart(form): AppMultipart<ToolMultipart>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let (form, image) = form.into_parts(None);
    let view = state.tools.create(form, image).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    put,
    path = "/api/v1/tools/{id}",
    tag = "Tools",
    operation_id = "updateTool",
    summary = "Update a tool",
    description = "Replaces the tool's fields. A new `image` replaces the stored one; without it the current image is kept.",
    params(("id" = i32, Path, description = "Tool ID"), RedirectQuery),
    request_body(content = ToolMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Tool updated", body = ToolView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tool, category or provider not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image could not be stored (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_tool(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppMultipart(form): AppMultipart<ToolMultipart>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    let (form, image) = form.into_parts(Some(id));
    let view = state.tools.update(form, image).await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tools/{id}",
    tag = "Tools",
    operation_id = "deleteTool",
    summary = "Delete a tool",
    description = "Deletes the tool, its maintenance notes and its stored image.",
    params(("id" = i32, Path, description = "Tool ID"), RedirectQuery),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tool not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_tool(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.tools.delete(id).await?;
    Ok(outcome.no_content())
}

#[utoipa::path(
    get,
    path = "/api/v1/tools/{id}/notes",
    tag = "Tools",
    operation_id = "listMaintenanceNotes",
    summary = "List a tool's maintenance notes",
    description = "Newest first.",
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Maintenance notes", body = Vec<NoteView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tool not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_notes(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<NoteView>>, AppError> {
    Ok(Json(state.tools.list_notes(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/tools/{id}/notes",
    tag = "Tools",
    operation_id = "addMaintenanceNote",
    summary = "Record a maintenance note",
    params(("id" = i32, Path, description = "Tool ID"), RedirectQuery),
    request_body = NoteForm,
    responses(
        (status = 201, description = "Note recorded", body = NoteView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Tool not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn add_note(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<NoteForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.tools.add_note(id, form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tools/{id}/notes/{note_id}",
    tag = "Tools",
    operation_id = "deleteMaintenanceNote",
    summary = "Delete a maintenance note",
    params(
        ("id" = i32, Path, description = "Tool ID"),
        ("note_id" = i32, Path, description = "Note ID"),
        RedirectQuery,
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Note not found on this tool (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_note(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, note_id)): Path<(i32, i32)>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.tools.delete_note(id, note_id).await?;
    Ok(outcome.no_content())
}
