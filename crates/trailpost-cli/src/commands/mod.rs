pub mod actions;
pub mod auth_cmd;
pub mod comment;
pub mod common;
pub mod completions;
pub mod config;
pub mod feed;
pub mod post;
pub mod search;
pub mod show;
pub mod upload;
pub mod user;
