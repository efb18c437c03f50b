pub mod config;
pub mod controllers;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod factory;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use common::config::ObjectStorageConfig;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::{AppConfig, CorsConfig};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "1.0.0",
        description = "Tools, materials, suppliers and project galleries for a field-service workshop"
    ),
    paths(
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::auth::me,
        handlers::tool::list_tools,
        handlers::tool::get_tool,
        handlers::tool::create_tool,
        handlers::tool::update_tool,
        handlers::tool::delete_tool,
        handlers::tool::list_notes,
        handlers::tool::add_note,
        handlers::tool::delete_note,
        handlers::material::list_materials,
        handlers::material::get_material,
        handlers::material::create_material,
        handlers::material::update_material,
        handlers::material::delete_material,
        handlers::catalog::list_categories,
        handlers::catalog::get_category,
        handlers::catalog::create_category,
        handlers::catalog::update_category,
        handlers::catalog::delete_category,
        handlers::catalog::list_providers,
        handlers::catalog::get_provider,
        handlers::catalog::create_provider,
        handlers::catalog::update_provider,
        handlers::catalog::delete_provider,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::user::delete_user,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::project::add_project_image,
        handlers::project::remove_project_image,
    ),
    components(schemas(error::ErrorBody, validation::FieldError)),
    tags(
        (name = "Auth", description = "Registration, sign-in and the current session"),
        (name = "Tools", description = "Tool inventory and maintenance notes"),
        (name = "Materials", description = "Consumable stock"),
        (name = "Catalog", description = "Categories and providers"),
        (name = "Users", description = "Profiles and account administration"),
        (name = "Projects", description = "Projects and their image galleries"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}

fn local_media_prefix(public_base_url: &str) -> Option<&str> {
    let prefix = public_base_url.trim_end_matches('/');
    (prefix.starts_with('/') && prefix.len() > 1).then_some(prefix)
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let config: &AppConfig = &state.config;
    let cors = cors_layer(&config.server.cors);

    let mut router = axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state.clone())
        .route(
            "/api-docs/openapi.json",
            axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()));

    // Filesystem uploads published under a site-relative prefix are served
    // by this process; absolute URLs point at some other host.
    if let ObjectStorageConfig::Filesystem(fs) = &config.storage
        && let Some(prefix) = local_media_prefix(&fs.public_base_url)
    {
        router = router.nest_service(prefix, ServeDir::new(&fs.root));
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}
