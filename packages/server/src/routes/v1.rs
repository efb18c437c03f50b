use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::extractors::multipart::upload_body_limit;
use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/tools", tool_routes())
        .nest("/materials", material_routes())
        .nest("/categories", category_routes())
        .nest("/providers", provider_routes())
        .nest("/users", user_routes())
        .nest("/projects", project_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(handlers::auth::sign_up))
        .route("/sign-in", post(handlers::auth::sign_in))
        .route("/me", get(handlers::auth::me))
}

fn tool_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tool::list_tools).post(handlers::tool::create_tool),
        )
        .route(
            "/{id}",
            get(handlers::tool::get_tool)
                .put(handlers::tool::update_tool)
                .delete(handlers::tool::delete_tool),
        )
        .layer(upload_body_limit())
        .route(
            "/{id}/notes",
            get(handlers::tool::list_notes).post(handlers::tool::add_note),
        )
        .route("/{id}/notes/{note_id}", delete(handlers::tool::delete_note))
}

fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::material::list_materials).post(handlers::material::create_material),
        )
        .route(
            "/{id}",
            get(handlers::material::get_material)
                .put(handlers::material::update_material)
                .delete(handlers::material::delete_material),
        )
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::catalog::list_categories).post(handlers::catalog::create_category),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_category)
                .put(handlers::catalog::update_category)
                .delete(handlers::catalog::delete_category),
        )
}

fn provider_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::catalog::list_providers).post(handlers::catalog::create_provider),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_provider)
                .put(handlers::catalog::update_provider)
                .delete(handlers::catalog::delete_provider),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::user::list_users))
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .layer(upload_body_limit())
}

fn project_routes() -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::project::list_projects).post(handlers::project::create_project),
        )
        .route(
            "/{id}",
            get(handlers::project::get_project)
                .put(handlers::project::update_project)
                .delete(handlers::project::delete_project),
        )
        .route(
            "/{id}/images/{image_id}",
            delete(handlers::project::remove_project_image),
        );

    let upload = Router::new()
        .route("/{id}/images", post(handlers::project::add_project_image))
        .layer(upload_body_limit());

    crud.merge(upload)
}
