//! trailpost-core - Client library for the Trailpost travel forum
//!
//! Typed access to the forum's REST backend, the session contract, and the
//! view state behind each screen: feed, post pages with optimistic like and
//! collect actions, paged comments, search, profiles and the post editor.

mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod lifetime;
pub mod models;
pub mod optimistic;
pub mod pagination;
pub mod session;
pub mod toc;
pub mod util;
pub mod views;

#[cfg(test)]
mod test_support;

pub use client::{ApiClient, Auth};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ValidationError};
pub use session::{MemorySessionStore, Session, SessionPersistence};
