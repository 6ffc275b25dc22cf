//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::AuthorRef;
use crate::optimistic::ToggleCounter;
use crate::util::truncate_chars;

/// Characters of a title shown on feed cards
pub const CARD_TITLE_CHARS: usize = 20;

/// A post as rendered by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Rich-text HTML body
    #[serde(default)]
    pub content: String,
    /// Cover image URL
    #[serde(default)]
    pub img_path: Option<String>,
    #[serde(rename = "user_id", default)]
    pub author: Option<AuthorRef>,
    #[serde(rename = "Creation_time", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub collections: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
    #[serde(rename = "isCollected", default)]
    pub is_collected: bool,
}

impl Post {
    /// Title cut for card layouts.
    pub fn card_title(&self) -> String {
        truncate_chars(&self.title, CARD_TITLE_CHARS)
    }
}

/// Newest first; posts without a timestamp sink to the end.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|left, right| right.created_at.cmp(&left.created_at));
}

/// `GET /posts/{id}/getPostData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    /// Whether the viewer may edit/delete the post
    #[serde(default)]
    pub permission: bool,
    pub post: Post,
}

/// `GET /posts/{id}/edit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostEditView {
    /// Only an explicit `false` refuses the editor
    #[serde(default)]
    pub permission: Option<bool>,
    pub post: Post,
}

impl PostEditView {
    pub const fn is_refused(&self) -> bool {
        matches!(self.permission, Some(false))
    }
}

/// Counters and viewer flags from `GET /posts/{id}/actions`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostActions {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub collections: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(rename = "isLiked", default)]
    pub is_liked: bool,
    #[serde(rename = "isCollected", default)]
    pub is_collected: bool,
}

impl PostActions {
    pub const fn like_counter(&self) -> ToggleCounter {
        ToggleCounter::new(self.is_liked, self.likes)
    }

    pub const fn collect_counter(&self) -> ToggleCounter {
        ToggleCounter::new(self.is_collected, self.collections)
    }
}

/// Authoritative state after `POST /posts/{id}/like`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResult {
    pub likes: u64,
    #[serde(rename = "hasLiked")]
    pub has_liked: bool,
}

/// Authoritative state after `POST /posts/{id}/collect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectResult {
    pub collections: u64,
    #[serde(rename = "isCollected")]
    pub is_collected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPost {
    #[serde(rename = "postId")]
    pub post_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// A related post with its server-computed similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub img_path: Option<String>,
    #[serde(default)]
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn post(id: &str, title: &str, day: Option<u32>) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            img_path: None,
            author: None,
            created_at: day.map(|day| Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()),
            likes: 0,
            collections: 0,
            views: 0,
            is_liked: false,
            is_collected: false,
        }
    }

    #[test]
    fn post_parses_populated_author_and_counters() {
        let post: Post = serde_json::from_str(
            r#"{"_id":"p1","title":"Lisbon","content":"<p>tiles</p>","img_path":"https://cdn/x.jpg",
                "user_id":{"_id":"u1","username":"ana","name":"Ana"},
                "Creation_time":"2024-05-02T10:00:00Z","likes":3,"views":40}"#,
        )
        .unwrap();
        assert_eq!(post.author.as_ref().map(AuthorRef::id), Some("u1"));
        assert_eq!(post.likes, 3);
        assert_eq!(post.collections, 0);
        assert_eq!(post.views, 40);
    }

    #[test]
    fn edit_view_refuses_only_explicit_false() {
        let missing: PostEditView =
            serde_json::from_str(r#"{"post":{"_id":"p1","title":"T"}}"#).unwrap();
        assert_eq!(missing.permission, None);
        assert!(!missing.is_refused());

        let refused: PostEditView =
            serde_json::from_str(r#"{"permission":false,"post":{"_id":"p1"}}"#).unwrap();
        assert!(refused.is_refused());

        let detail: PostDetail = serde_json::from_str(r#"{"post":{"_id":"p1"}}"#).unwrap();
        assert!(!detail.permission);
    }

    #[test]
    fn sort_newest_first_orders_by_creation() {
        let mut posts = vec![post("a", "", Some(1)), post("b", "", None), post("c", "", Some(9))];
        sort_newest_first(&mut posts);
        let ids = posts.iter().map(|post| post.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn card_title_truncates_at_twenty_chars() {
        assert_eq!(post("a", "Short trip", None).card_title(), "Short trip");
        assert_eq!(
            post("a", "Twenty one characters!", None).card_title(),
            "Twenty one character..."
        );
    }

    #[test]
    fn actions_snapshot_uses_camel_case_flags() {
        let actions: PostActions = serde_json::from_str(
            r#"{"likes":5,"collections":2,"views":90,"isLiked":true,"isCollected":false}"#,
        )
        .unwrap();
        assert_eq!(actions.like_counter(), ToggleCounter::new(true, 5));
        assert_eq!(actions.collect_counter(), ToggleCounter::new(false, 2));
    }
}
