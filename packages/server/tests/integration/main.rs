mod common;

mod auth;
mod catalog;
mod material;
mod project;
mod tool;
mod user;
