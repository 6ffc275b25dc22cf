//! Post endpoints: feed, detail, authoring, search, and viewer actions.

use serde_json::json;

use crate::client::{ApiClient, Auth};
use crate::error::{ApiError, ApiResult};
use crate::forms::{normalize_identifier, normalize_keyword, PostDraft};
use crate::models::{
    Ack, CollectResult, CreatedPost, LikeResult, Post, PostActions, PostDetail, PostEditView,
    Recommendation, Recommendations, SearchResults,
};
use crate::session::SessionPersistence;
use crate::util::path_segment;

/// `/posts/{id}{suffix}` with the id validated and encoded.
pub(crate) fn post_path(post_id: &str, suffix: &str) -> ApiResult<String> {
    let post_id = normalize_identifier("Post", post_id)?;
    Ok(format!("/posts/{}{}", path_segment(&post_id), suffix))
}

impl<S: SessionPersistence> ApiClient<S> {
    /// Every post, in server order.
    pub async fn feed(&self) -> ApiResult<Vec<Post>> {
        self.get("/posts/", Auth::Optional).await
    }

    /// Posts written by `user_id`.
    pub async fn posts_by_user(&self, user_id: &str) -> ApiResult<Vec<Post>> {
        let user_id = normalize_identifier("User", user_id)?;
        self.get(&format!("/posts/{}", path_segment(&user_id)), Auth::Optional)
            .await
    }

    /// Full post plus whether the viewer may edit it.
    pub async fn post_detail(&self, post_id: &str) -> ApiResult<PostDetail> {
        self.get(&post_path(post_id, "/getPostData")?, Auth::Optional)
            .await
    }

    /// Post content for the editor. Fails with `Forbidden` when the server
    /// answers `permission: false`.
    pub async fn post_edit_view(&self, post_id: &str) -> ApiResult<PostEditView> {
        let detail: PostEditView = self
            .get(&post_path(post_id, "/edit")?, Auth::Required)
            .await?;
        if detail.is_refused() {
            return Err(ApiError::Forbidden(
                "You do not have permission to edit this post".to_string(),
            ));
        }
        Ok(detail)
    }

    pub async fn create_post(&self, draft: &PostDraft) -> ApiResult<CreatedPost> {
        draft.validate()?;
        self.post("/posts/create-post", draft, Auth::Required).await
    }

    pub async fn edit_post(&self, post_id: &str, draft: &PostDraft) -> ApiResult<Ack> {
        draft.validate()?;
        self.post(&post_path(post_id, "/edit")?, draft, Auth::Required)
            .await
    }

    pub async fn delete_post(&self, post_id: &str) -> ApiResult<Ack> {
        self.post(&post_path(post_id, "/delete")?, &json!({}), Auth::Required)
            .await
    }

    pub async fn search_posts(&self, keyword: &str) -> ApiResult<Vec<Post>> {
        let keyword = normalize_keyword(keyword)?;
        let results: SearchResults = self
            .post("/posts/search", &json!({ "keyword": keyword }), Auth::Optional)
            .await?;
        Ok(results.posts)
    }

    pub async fn recommendations(&self, post_id: &str) -> ApiResult<Vec<Recommendation>> {
        let post_id = normalize_identifier("Post", post_id)?;
        let path = format!("/posts/recommendations/{}", path_segment(&post_id));
        let results: Recommendations = self.get(&path, Auth::Optional).await?;
        Ok(results.recommendations)
    }

    /// Like/collect/view counters and the viewer's flags.
    pub async fn post_actions(&self, post_id: &str) -> ApiResult<PostActions> {
        self.get(&post_path(post_id, "/actions")?, Auth::Optional)
            .await
    }

    /// Toggles the viewer's like.
    pub async fn like_post(&self, post_id: &str) -> ApiResult<LikeResult> {
        self.post(&post_path(post_id, "/like")?, &json!({}), Auth::Required)
            .await
    }

    /// Toggles the viewer's bookmark.
    pub async fn collect_post(&self, post_id: &str) -> ApiResult<CollectResult> {
        self.post(&post_path(post_id, "/collect")?, &json!({}), Auth::Required)
            .await
    }
}
