//! Data models for the forum API

mod comment;
mod post;
mod user;

use serde::{Deserialize, Serialize};

pub use comment::{Comment, CommentPage, CommentVote};
pub use post::{
    sort_newest_first, CollectResult, CreatedPost, LikeResult, Post, PostActions, PostDetail,
    PostEditView, Recommendation, Recommendations, SearchResults, CARD_TITLE_CHARS,
};
pub use user::{AuthorRef, User, UserSummary};

/// Login/registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "data")]
    pub user: User,
}

/// Responses that wrap a single user under `user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Body of mutations whose only useful output is success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}
