pub mod auth;
pub mod catalog;
pub mod material;
pub mod outcome;
pub mod project;
pub mod tool;
pub mod user;
