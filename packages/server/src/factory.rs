//! Composition root.
//!
//! Each factory wires one controller from the process-wide [`Resources`]:
//! repositories over the shared connection, validators, services, and the
//! image service. Factories perform no I/O.

use std::sync::Arc;

use common::storage::ObjectStore;
use sea_orm::DatabaseConnection;

use crate::config::{AuthConfig, ImageConfig};
use crate::controllers::{
    CatalogController, MaterialController, ProjectController, SignUpController, ToolController,
    UserController,
};
use crate::repository::{
    SqlCategoryRepository, SqlMaintenanceNoteRepository, SqlMaterialRepository,
    SqlProjectImageRepository, SqlProjectRepository, SqlProviderRepository, SqlToolRepository,
    SqlUserRepository,
};
use crate::services::{
    CategoryService, ImageService, MaintenanceNoteService, MaterialService, ProjectService,
    ProviderService, ToolService, UserService,
};
use crate::validation::{
    CategoryValidator, MaintenanceNoteValidator, MaterialValidator, ProfileValidator,
    ProjectImageValidator, ProjectValidator, ProviderValidator, SignInValidator,
    SignUpValidator, ToolValidator,
};

/// Handles shared by every controller.
#[derive(Clone)]
pub struct Resources {
    pub db: DatabaseConnection,
    pub objects: Arc<dyn ObjectStore>,
    pub images: ImageConfig,
    pub auth: AuthConfig,
}

impl Resources {
    fn image_service(&self) -> Arc<ImageService> {
        Arc::new(ImageService::new(self.objects.clone(), self.images.clone()))
    }

    fn category_service(&self) -> Arc<CategoryService> {
        Arc::new(CategoryService::new(Arc::new(SqlCategoryRepository::new(
            self.db.clone(),
        ))))
    }

    fn provider_service(&self) -> Arc<ProviderService> {
        Arc::new(ProviderService::new(Arc::new(SqlProviderRepository::new(
            self.db.clone(),
        ))))
    }

    fn user_service(&self) -> Arc<UserService> {
        Arc::new(UserService::new(Arc::new(SqlUserRepository::new(
            self.db.clone(),
        ))))
    }
}

pub fn create_tool_controller(res: &Resources) -> ToolController {
    let categories = res.category_service();
    let providers = res.provider_service();
    let notes = Arc::new(MaintenanceNoteService::new(Arc::new(
        SqlMaintenanceNoteRepository::new(res.db.clone()),
    )));
    let tools = Arc::new(ToolService::new(
        Arc::new(SqlToolRepository::new(res.db.clone())),
        notes.clone(),
        categories.clone(),
        providers.clone(),
    ));

    ToolController::new(
        res.image_service(),
        Arc::new(ToolValidator),
        categories,
        providers,
        tools,
        Arc::new(MaintenanceNoteValidator),
        notes,
    )
}

pub fn create_material_controller(res: &Resources) -> MaterialController {
    let categories = res.category_service();
    let providers = res.provider_service();
    let materials = Arc::new(MaterialService::new(
        Arc::new(SqlMaterialRepository::new(res.db.clone())),
        categories.clone(),
        providers.clone(),
    ));

    MaterialController::new(
        Arc::new(MaterialValidator::new()),
        categories,
        providers,
        materials,
    )
}

pub fn create_catalog_controller(res: &Resources) -> CatalogController {
    CatalogController::new(
        Arc::new(CategoryValidator),
        res.category_service(),
        Arc::new(ProviderValidator),
        res.provider_service(),
    )
}

pub fn create_user_controller(res: &Resources) -> UserController {
    UserController::new(
        res.user_service(),
        res.image_service(),
        Arc::new(ProfileValidator),
    )
}

pub fn create_sign_up_controller(res: &Resources) -> SignUpController {
    SignUpController::new(
        res.user_service(),
        Arc::new(SignUpValidator),
        Arc::new(SignInValidator),
        res.auth.clone(),
    )
}

pub fn create_project_controller(res: &Resources) -> ProjectController {
    let projects = Arc::new(ProjectService::new(
        Arc::new(SqlProjectRepository::new(res.db.clone())),
        Arc::new(SqlProjectImageRepository::new(res.db.clone())),
    ));

    ProjectController::new(
        projects,
        res.image_service(),
        Arc::new(ProjectValidator),
        Arc::new(ProjectImageValidator),
    )
}
