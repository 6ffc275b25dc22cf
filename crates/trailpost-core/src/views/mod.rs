//! View controllers: the state behind each screen, with all I/O delegated to
//! [`crate::ApiClient`].
//!
//! Every view owns a [`crate::lifetime::ViewLifetime`]; closing the view
//! drops responses that arrive afterwards.

mod comments;
mod editor;
mod feed;
mod post_actions;
mod post_detail;
mod profile;
mod search;

pub use comments::{CommentThread, ThreadState};
pub use editor::{CoverUpload, PostEditor};
pub use feed::{FeedView, PostCard, PostWindow};
pub use post_actions::{ActionsState, PostActionsView};
pub use post_detail::PostDetailView;
pub use profile::ProfileView;
pub use search::{excerpt, SearchHit, SearchView, EXCERPT_CHARS};
