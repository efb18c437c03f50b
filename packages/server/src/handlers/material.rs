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
use crate::models::material::{MaterialForm, MaterialListResponse, MaterialView};
use crate::models::shared::ListQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/materials",
    tag = "Materials",
    operation_id = "listMaterials",
    summary = "List materials",
    description = "Paginated material list with category/provider names. `status` accepts `active` or `inactive`.",
    params(ListQuery),
    responses(
        (status = 200, description = "List of materials", body = MaterialListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_materials(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MaterialListResponse>, AppError> {
    let page = state.materials.list(&query).await?;
    Ok(Json(MaterialListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    operation_id = "getMaterial",
    summary = "Get a material",
    params(("id" = i32, Path, description = "Material ID")),
    responses(
        (status = 200, description = "Material", body = MaterialView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Material not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_material(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MaterialView>, AppError> {
    Ok(Json(state.materials.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/materials",
    tag = "Materials",
    operation_id = "createMaterial",
    summary = "Create a material",
    description = "Stock and cost must not be negative; an expiration date must not be in the past. The category and provider must exist.",
    params(RedirectQuery),
    request_body = MaterialForm,
    responses(
        (status = 201, description = "Material created", body = MaterialView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category or provider not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn create_material(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<MaterialForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.materials.create(form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    put,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    operation_id = "updateMaterial",
    summary = "Update a material",
    params(("id" = i32, Path, description = "Material ID"), RedirectQuery),
    request_body = MaterialForm,
    responses(
        (status = 200, description = "Material updated", body = MaterialView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Material, category or provider not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_material(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(mut form): AppJson<MaterialForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    form.id = Some(id);
    let view = state.materials.update(form).await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/materials/{id}",
    tag = "Materials",
    operation_id = "deleteMaterial",
    summary = "Delete a material",
    params(("id" = i32, Path, description = "Material ID"), RedirectQuery),
    responses(
        (status = 204, description = "Material deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Material not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_material(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.materials.delete(id).await?;
    Ok(outcome.no_content())
}
