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
use crate::models::catalog::{
    CategoryForm, CategoryListResponse, CategoryView, ProviderForm, ProviderListResponse,
    ProviderView,
};
use crate::models::shared::ListQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Catalog",
    operation_id = "listCategories",
    summary = "List categories",
    params(ListQuery),
    responses(
        (status = 200, description = "List of categories", body = CategoryListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_categories(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let page = state.catalog.list_categories(&query).await?;
    Ok(Json(CategoryListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Catalog",
    operation_id = "getCategory",
    summary = "Get a category",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryView>, AppError> {
    Ok(Json(state.catalog.get_category(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Catalog",
    operation_id = "createCategory",
    summary = "Create a category",
    params(RedirectQuery),
    request_body = CategoryForm,
    responses(
        (status = 201, description = "Category created", body = CategoryView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Category name already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn create_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<CategoryForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.catalog.create_category(form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Catalog",
    operation_id = "updateCategory",
    summary = "Rename a category",
    params(("id" = i32, Path, description = "Category ID"), RedirectQuery),
    request_body = CategoryForm,
    responses(
        (status = 200, description = "Category updated", body = CategoryView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Category name already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(mut form): AppJson<CategoryForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    form.id = Some(id);
    let view = state.catalog.update_category(form).await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Catalog",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Tools and materials in the category are kept; their category name becomes null.",
    params(("id" = i32, Path, description = "Category ID"), RedirectQuery),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.catalog.delete_category(id).await?;
    Ok(outcome.no_content())
}

#[utoipa::path(
    get,
    path = "/api/v1/providers",
    tag = "Catalog",
    operation_id = "listProviders",
    summary = "List providers",
    params(ListQuery),
    responses(
        (status = 200, description = "List of providers", body = ProviderListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id))]
pub async fn list_providers(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProviderListResponse>, AppError> {
    let page = state.catalog.list_providers(&query).await?;
    Ok(Json(ProviderListResponse {
        data: page.items,
        pagination: query.pagination(page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/providers/{id}",
    tag = "Catalog",
    operation_id = "getProvider",
    summary = "Get a provider",
    params(("id" = i32, Path, description = "Provider ID")),
    responses(
        (status = 200, description = "Provider", body = ProviderView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_provider(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProviderView>, AppError> {
    Ok(Json(state.catalog.get_provider(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/providers",
    tag = "Catalog",
    operation_id = "createProvider",
    summary = "Create a provider",
    params(RedirectQuery),
    request_body = ProviderForm,
    responses(
        (status = 201, description = "Provider created", body = ProviderView),
        (status = 303, description = "Created; redirected with createSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn create_provider(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(form): AppJson<ProviderForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Created)?;
    let view = state.catalog.create_provider(form).await?;
    Ok(outcome.json(StatusCode::CREATED, view))
}

#[utoipa::path(
    put,
    path = "/api/v1/providers/{id}",
    tag = "Catalog",
    operation_id = "updateProvider",
    summary = "Update a provider",
    params(("id" = i32, Path, description = "Provider ID"), RedirectQuery),
    request_body = ProviderForm,
    responses(
        (status = 200, description = "Provider updated", body = ProviderView),
        (status = 303, description = "Updated; redirected with updateSuccess=true"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect, form), fields(user_id = auth_user.user_id))]
pub async fn update_provider(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
    AppJson(mut form): AppJson<ProviderForm>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Updated)?;
    form.id = Some(id);
    let view = state.catalog.update_provider(form).await?;
    Ok(outcome.json(StatusCode::OK, view))
}

#[utoipa::path(
    delete,
    path = "/api/v1/providers/{id}",
    tag = "Catalog",
    operation_id = "deleteProvider",
    summary = "Delete a provider",
    description = "Tools and materials from the provider are kept; their provider name becomes null.",
    params(("id" = i32, Path, description = "Provider ID"), RedirectQuery),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 303, description = "Deleted; redirected with deleteSuccess=true"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Provider not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, redirect), fields(user_id = auth_user.user_id))]
pub async fn delete_provider(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(redirect): Query<RedirectQuery>,
) -> Result<Response, AppError> {
    let outcome = redirect.outcome(Flash::Deleted)?;
    state.catalog.delete_provider(id).await?;
    Ok(outcome.no_content())
}
