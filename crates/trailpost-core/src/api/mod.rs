//! Typed bindings for each backend endpoint.
//!
//! Every method is an inherent method on [`ApiClient`](crate::client::ApiClient),
//! grouped by resource.

mod comments;
mod media;
mod posts;
mod users;
