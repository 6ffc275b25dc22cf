//! Comment endpoints.

use serde_json::json;

use super::posts::post_path;
use crate::client::{ApiClient, Auth};
use crate::error::ApiResult;
use crate::forms::{normalize_identifier, CommentDraft};
use crate::models::{Ack, Comment, CommentPage, CommentVote};
use crate::session::SessionPersistence;
use crate::util::path_segment;

fn comment_path(post_id: &str, comment_id: &str, action: &str) -> ApiResult<String> {
    let comment_id = normalize_identifier("Comment", comment_id)?;
    post_path(
        post_id,
        &format!("/comments/{}/{action}", path_segment(&comment_id)),
    )
}

impl<S: SessionPersistence> ApiClient<S> {
    /// One page of comments; `page` is 1-based.
    pub async fn comments_page(
        &self,
        post_id: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<CommentPage> {
        let path = post_path(post_id, &format!("/comments/{}/{}", page.max(1), page_size))?;
        self.get(&path, Auth::Optional).await
    }

    pub async fn add_comment(&self, post_id: &str, draft: &CommentDraft) -> ApiResult<Comment> {
        self.post(&post_path(post_id, "/comments")?, draft, Auth::Required)
            .await
    }

    pub async fn like_comment(&self, post_id: &str, comment_id: &str) -> ApiResult<CommentVote> {
        self.post(
            &comment_path(post_id, comment_id, "like")?,
            &json!({}),
            Auth::Required,
        )
        .await
    }

    pub async fn dislike_comment(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> ApiResult<CommentVote> {
        self.post(
            &comment_path(post_id, comment_id, "dislike")?,
            &json!({}),
            Auth::Required,
        )
        .await
    }

    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> ApiResult<Ack> {
        self.post(
            &comment_path(post_id, comment_id, "delete")?,
            &json!({}),
            Auth::Required,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_path_nests_under_post() {
        assert_eq!(
            comment_path("p1", "c9", "dislike").unwrap(),
            "/posts/p1/comments/c9/dislike"
        );
        assert!(comment_path("p1", "", "like").is_err());
    }
}
