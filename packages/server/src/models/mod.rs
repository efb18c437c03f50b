pub mod catalog;
pub mod maintenance;
pub mod material;
pub mod project;
pub mod shared;
pub mod tool;
pub mod user;
