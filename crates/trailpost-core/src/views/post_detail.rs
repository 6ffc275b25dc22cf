//! Post page: content, table of contents, actions, comments and related posts.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::lifetime::ViewLifetime;
use crate::models::{PostActions, PostDetail, Recommendation};
use crate::session::SessionPersistence;
use crate::toc::TableOfContents;

use super::comments::CommentThread;
use super::post_actions::PostActionsView;

pub struct PostDetailView<S: SessionPersistence> {
    client: ApiClient<S>,
    post_id: String,
    lifetime: ViewLifetime,
    detail: Option<PostDetail>,
    toc: TableOfContents,
    recommendations: Vec<Recommendation>,
    actions: PostActionsView<S>,
    comments: CommentThread<S>,
    warnings: Vec<String>,
}

impl<S: SessionPersistence> PostDetailView<S> {
    pub fn new(client: ApiClient<S>, post_id: impl Into<String>, comment_page_size: u32) -> Self {
        let post_id = post_id.into();
        let lifetime = ViewLifetime::new();
        Self {
            actions: PostActionsView::new(client.clone(), post_id.as_str(), lifetime.clone()),
            comments: CommentThread::new(
                client.clone(),
                post_id.as_str(),
                comment_page_size,
                lifetime.clone(),
            ),
            client,
            post_id,
            lifetime,
            detail: None,
            toc: TableOfContents::default(),
            recommendations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Fetches the post, its first comment page, its counters and related
    /// posts concurrently.
    ///
    /// Only a failed post fetch is an error; the other pieces degrade to
    /// entries in [`PostDetailView::warnings`].
    pub async fn load(&mut self) -> ApiResult<()> {
        let (detail, recommendations, comments, actions) = tokio::join!(
            self.lifetime.guard(self.client.post_detail(&self.post_id)),
            self.lifetime
                .guard(self.client.recommendations(&self.post_id)),
            self.comments.load_page(1),
            self.actions.load(),
        );

        self.warnings.clear();
        match recommendations.and_then(|result| result) {
            Ok(recommendations) => self.recommendations = recommendations,
            Err(error) => self.note("recommendations", &error),
        }
        if let Err(error) = comments {
            self.note("comments", &error);
        }
        let actions_failed = match actions {
            Ok(_) => false,
            Err(error) => {
                self.note("actions", &error);
                true
            }
        };

        let detail = detail.and_then(|result| result)?;
        if actions_failed {
            let post = &detail.post;
            self.actions.seed(
                PostActions {
                    likes: post.likes,
                    collections: post.collections,
                    views: post.views,
                    is_liked: post.is_liked,
                    is_collected: post.is_collected,
                }
                .into(),
            );
        }
        self.comments.set_post_author(
            detail
                .post
                .author
                .as_ref()
                .map(|author| author.id().to_string()),
        );
        self.toc = TableOfContents::build(&detail.post.content);
        self.detail = Some(detail);
        Ok(())
    }

    fn note(&mut self, part: &str, error: &ApiError) {
        if matches!(error, ApiError::Cancelled) {
            return;
        }
        tracing::warn!("Could not load {} for post {}: {}", part, self.post_id, error);
        self.warnings.push(format!("Could not load {part}: {error}"));
    }

    pub const fn detail(&self) -> Option<&PostDetail> {
        self.detail.as_ref()
    }

    /// Whether the viewer may edit or delete the post.
    pub fn can_edit(&self) -> bool {
        self.detail.as_ref().is_some_and(|detail| detail.permission)
    }

    pub const fn toc(&self) -> &TableOfContents {
        &self.toc
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub const fn actions(&self) -> &PostActionsView<S> {
        &self.actions
    }

    pub const fn comments(&self) -> &CommentThread<S> {
        &self.comments
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Ends the view; responses still in flight are dropped.
    pub fn close(&self) {
        self.lifetime.end();
    }
}
