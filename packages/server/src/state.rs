use std::sync::Arc;

use crate::config::AppConfig;
use crate::controllers::{
    CatalogController, MaterialController, ProjectController, SignUpController, ToolController,
    UserController,
};
use crate::factory::{self, Resources};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tools: Arc<ToolController>,
    pub materials: Arc<MaterialController>,
    pub catalog: Arc<CatalogController>,
    pub users: Arc<UserController>,
    pub sign_up: Arc<SignUpController>,
    pub projects: Arc<ProjectController>,
}

impl AppState {
    /// Build every controller once; handlers share them through the state.
    pub fn from_resources(config: AppConfig, resources: &Resources) -> Self {
        Self {
            config: Arc::new(config),
            tools: Arc::new(factory::create_tool_controller(resources)),
            materials: Arc::new(factory::create_material_controller(resources)),
            catalog: Arc::new(factory::create_catalog_controller(resources)),
            users: Arc::new(factory::create_user_controller(resources)),
            sign_up: Arc::new(factory::create_sign_up_controller(resources)),
            projects: Arc::new(factory::create_project_controller(resources)),
        }
    }
}
