pub mod category;
pub mod maintenance_note;
pub mod material;
pub mod project;
pub mod project_image;
pub mod provider;
pub mod tool;
pub mod user;
