//! Comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;
use crate::optimistic::ToggleCounter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(rename = "Creation_time", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(rename = "hasLiked", default)]
    pub has_liked: bool,
    #[serde(rename = "hasDisliked", default)]
    pub has_disliked: bool,
    /// Whether the viewer may delete this comment
    #[serde(default)]
    pub permission: bool,
}

impl Comment {
    pub const fn like_counter(&self) -> ToggleCounter {
        ToggleCounter::new(self.has_liked, self.likes)
    }

    pub const fn dislike_counter(&self) -> ToggleCounter {
        ToggleCounter::new(self.has_disliked, self.dislikes)
    }

    pub fn author_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    /// Overwrites vote counters and flags with the server's values.
    pub fn apply_vote(&mut self, vote: &CommentVote) {
        self.likes = vote.likes;
        self.dislikes = vote.dislikes;
        self.has_liked = vote.has_liked;
        self.has_disliked = vote.has_disliked;
    }
}

/// Authoritative comment state returned by like/dislike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentVote {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(rename = "hasLiked", default)]
    pub has_liked: bool,
    #[serde(rename = "hasDisliked", default)]
    pub has_disliked: bool,
}

/// One page from `GET /posts/{id}/comments/{page}/{pageSize}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(rename = "totalPages", default = "default_total_pages")]
    pub total_pages: u32,
}

const fn default_total_pages() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_page_parses_and_defaults_total() {
        let page: CommentPage = serde_json::from_str(
            r#"{"comments":[{"_id":"c1","content":"Great tips","likes":2,"hasLiked":true,
                "user":{"_id":"u1","username":"ana","name":"Ana"},"permission":true}]}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages, 1);
        let comment = &page.comments[0];
        assert_eq!(comment.like_counter(), ToggleCounter::new(true, 2));
        assert_eq!(comment.author_id(), Some("u1"));
        assert!(comment.permission);
    }

    #[test]
    fn apply_vote_overwrites_both_counters() {
        let mut comment: Comment =
            serde_json::from_str(r#"{"_id":"c1","likes":1,"dislikes":4,"hasDisliked":true}"#)
                .unwrap();
        comment.apply_vote(&CommentVote {
            id: "c1".to_string(),
            likes: 2,
            dislikes: 3,
            has_liked: true,
            has_disliked: false,
        });
        assert_eq!(comment.like_counter(), ToggleCounter::new(true, 2));
        assert_eq!(comment.dislike_counter(), ToggleCounter::new(false, 3));
    }
}
