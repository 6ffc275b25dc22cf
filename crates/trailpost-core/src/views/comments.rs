//! Paged comment thread under a post.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::forms::CommentDraft;
use crate::lifetime::ViewLifetime;
use crate::models::{Comment, CommentVote};
use crate::optimistic::{
    ActionController, ActionKey, ActionKind, ActionOutcome, CounterAccess, ToggleCounter,
};
use crate::pagination::PageCursor;
use crate::session::SessionPersistence;

/// Comments on the current page and where that page sits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadState {
    pub comments: Vec<Comment>,
    pub cursor: PageCursor,
    /// Author of the post, used to badge their comments
    pub post_author: Option<String>,
}

impl ThreadState {
    fn comment_mut(&mut self, comment_id: &str) -> Option<&mut Comment> {
        self.comments
            .iter_mut()
            .find(|comment| comment.id == comment_id)
    }

    pub fn is_by_post_author(&self, comment: &Comment) -> bool {
        matches!(
            (self.post_author.as_deref(), comment.author_id()),
            (Some(author), Some(commenter)) if author == commenter
        )
    }
}

struct VoteCounter<'a> {
    comment_id: &'a str,
    kind: ActionKind,
}

impl CounterAccess<ThreadState> for VoteCounter<'_> {
    fn get(&self, state: &ThreadState) -> Option<ToggleCounter> {
        let comment = state
            .comments
            .iter()
            .find(|comment| comment.id == self.comment_id)?;
        Some(match self.kind {
            ActionKind::CommentDislike => comment.dislike_counter(),
            _ => comment.like_counter(),
        })
    }

    fn set(&self, state: &mut ThreadState, counter: ToggleCounter) {
        let Some(comment) = state.comment_mut(self.comment_id) else {
            return;
        };
        if self.kind == ActionKind::CommentDislike {
            comment.has_disliked = counter.active;
            comment.dislikes = counter.count;
        } else {
            comment.has_liked = counter.active;
            comment.likes = counter.count;
        }
    }
}

pub struct CommentThread<S: SessionPersistence> {
    client: ApiClient<S>,
    post_id: String,
    controller: ActionController<ThreadState>,
}

impl<S: SessionPersistence> CommentThread<S> {
    pub fn new(
        client: ApiClient<S>,
        post_id: impl Into<String>,
        page_size: u32,
        lifetime: ViewLifetime,
    ) -> Self {
        let state = ThreadState {
            cursor: PageCursor::new(page_size),
            ..ThreadState::default()
        };
        Self {
            client,
            post_id: post_id.into(),
            controller: ActionController::with_lifetime(state, lifetime),
        }
    }

    pub fn set_post_author(&self, author: Option<String>) {
        self.controller.update(|state| state.post_author = author);
    }

    pub fn state(&self) -> ThreadState {
        self.controller.read(ThreadState::clone)
    }

    pub fn cursor(&self) -> PageCursor {
        self.controller.read(|state| state.cursor)
    }

    /// Requests exactly one page and replaces the visible comments.
    pub async fn load_page(&self, page: u32) -> ApiResult<()> {
        let page_size = self.cursor().page_size;
        let response = self
            .controller
            .lifetime()
            .guard(self.client.comments_page(&self.post_id, page, page_size))
            .await??;
        tracing::debug!(
            "Loaded comment page {}/{} for {}",
            page,
            response.total_pages,
            self.post_id
        );
        self.controller.update(|state| {
            state.comments = response.comments;
            state.cursor.apply_response(page, response.total_pages);
        });
        Ok(())
    }

    pub async fn reload(&self) -> ApiResult<()> {
        self.load_page(self.cursor().current_page).await
    }

    /// Moves forward one page; `false` when already on the last page.
    pub async fn next_page(&self) -> ApiResult<bool> {
        self.load_target(self.cursor().next_target()).await
    }

    pub async fn prev_page(&self) -> ApiResult<bool> {
        self.load_target(self.cursor().prev_target()).await
    }

    /// Jumps to the page typed by the user; unusable input is discarded.
    pub async fn jump(&self, input: &str) -> ApiResult<bool> {
        self.load_target(self.cursor().jump_target(input)).await
    }

    async fn load_target(&self, target: Option<u32>) -> ApiResult<bool> {
        match target {
            Some(page) => {
                self.load_page(page).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Posts a comment and reloads the current page.
    ///
    /// Blank text is a no-op and returns `None`.
    pub async fn submit(&self, text: &str) -> ApiResult<Option<Comment>> {
        let Ok(draft) = CommentDraft::new(text) else {
            return Ok(None);
        };
        let created = self
            .controller
            .lifetime()
            .guard(self.client.add_comment(&self.post_id, &draft))
            .await??;
        self.reload().await?;
        Ok(Some(created))
    }

    pub async fn like(&self, comment_id: &str) -> ApiResult<ActionOutcome> {
        self.vote(comment_id, ActionKind::CommentLike).await
    }

    pub async fn dislike(&self, comment_id: &str) -> ApiResult<ActionOutcome> {
        self.vote(comment_id, ActionKind::CommentDislike).await
    }

    async fn vote(&self, comment_id: &str, kind: ActionKind) -> ApiResult<ActionOutcome> {
        let authenticated = self.client.is_signed_in()?;
        let mutation = async {
            if kind == ActionKind::CommentDislike {
                self.client.dislike_comment(&self.post_id, comment_id).await
            } else {
                self.client.like_comment(&self.post_id, comment_id).await
            }
        };
        Ok(self
            .controller
            .run(
                ActionKey::new(comment_id, kind),
                authenticated,
                &VoteCounter { comment_id, kind },
                mutation,
                |state: &mut ThreadState, vote: CommentVote| {
                    if let Some(comment) = state.comment_mut(comment_id) {
                        comment.apply_vote(&vote);
                    }
                },
            )
            .await)
    }

    /// Deletes a comment, drops it locally, then reloads the page.
    pub async fn delete(&self, comment_id: &str) -> ApiResult<()> {
        self.controller
            .lifetime()
            .guard(self.client.delete_comment(&self.post_id, comment_id))
            .await??;
        self.controller
            .update(|state| state.comments.retain(|comment| comment.id != comment_id));
        self.reload().await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::session::{MemorySessionStore, Session};
    use crate::test_support::StubServer;

    fn comment(id: &str, author: &str, likes: u64) -> Comment {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "content": "Worth the hike",
            "user": {"_id": author, "username": author},
            "likes": likes,
        }))
        .unwrap()
    }

    fn thread(store: MemorySessionStore) -> CommentThread<MemorySessionStore> {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        thread_with(ApiClient::new(&config, store).unwrap())
    }

    fn thread_with(client: ApiClient<MemorySessionStore>) -> CommentThread<MemorySessionStore> {
        let thread = CommentThread::new(client, "p1", 5, ViewLifetime::new());
        thread.controller.update(|state| {
            state.comments = vec![comment("c1", "u1", 2), comment("c2", "u2", 0)];
            state.cursor.apply_response(2, 3);
        });
        thread
    }

    #[test]
    fn vote_counter_targets_one_comment_and_kind() {
        let mut state = ThreadState {
            comments: vec![comment("c1", "u1", 2), comment("c2", "u2", 0)],
            ..ThreadState::default()
        };
        let dislike = VoteCounter {
            comment_id: "c2",
            kind: ActionKind::CommentDislike,
        };
        let toggled = dislike.get(&state).unwrap().toggled();
        dislike.set(&mut state, toggled);

        assert_eq!(state.comments[1].dislike_counter(), ToggleCounter::new(true, 1));
        assert_eq!(state.comments[1].like_counter(), ToggleCounter::new(false, 0));
        assert_eq!(state.comments[0].like_counter(), ToggleCounter::new(false, 2));
        assert!(VoteCounter {
            comment_id: "missing",
            kind: ActionKind::CommentLike,
        }
        .get(&state)
        .is_none());
    }

    #[test]
    fn post_author_comments_are_marked() {
        let thread = thread(MemorySessionStore::new());
        thread.set_post_author(Some("u2".to_string()));
        let state = thread.state();
        assert!(!state.is_by_post_author(&state.comments[0]));
        assert!(state.is_by_post_author(&state.comments[1]));
    }

    #[tokio::test]
    async fn blank_submit_is_a_no_op() {
        let thread = thread(MemorySessionStore::new());
        assert_eq!(thread.submit("   ").await.unwrap(), None);
        assert_eq!(thread.state().comments.len(), 2);
    }

    #[tokio::test]
    async fn submit_without_session_fails_before_sending() {
        let thread = thread(MemorySessionStore::new());
        assert!(matches!(
            thread.submit("Great route").await,
            Err(ApiError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn out_of_range_jump_is_not_requested() {
        let thread = thread(MemorySessionStore::new());
        assert!(!thread.jump("9").await.unwrap());
        assert!(!thread.jump("page").await.unwrap());
        assert_eq!(thread.cursor().current_page, 2);
    }

    #[tokio::test]
    async fn vote_on_missing_comment_reports_not_found() {
        let thread = thread(MemorySessionStore::with_session(Session::new("tok", "u9")));
        let outcome = thread.like("gone").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::NotFound));
    }

    #[tokio::test]
    async fn failed_like_restores_comment() {
        let thread = thread(MemorySessionStore::with_session(Session::new("tok", "u9")));
        let outcome = thread.like("c1").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::RolledBack(_)));
        assert_eq!(
            thread.state().comments[0].like_counter(),
            ToggleCounter::new(false, 2)
        );
    }

    #[tokio::test]
    async fn server_vote_overwrites_both_counters() {
        let server = StubServer::respond(
            200,
            r#"{"_id":"c1","likes":1,"dislikes":3,"hasLiked":false,"hasDisliked":true}"#,
        )
        .await;
        let thread = thread_with(
            server.client(MemorySessionStore::with_session(Session::new("tok", "u9"))),
        );

        let outcome = thread.dislike("c1").await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Settled));
        let comment = thread.state().comments[0].clone();
        assert_eq!(comment.like_counter(), ToggleCounter::new(false, 1));
        assert_eq!(comment.dislike_counter(), ToggleCounter::new(true, 3));
        assert!(server
            .received()
            .await
            .starts_with("POST /posts/p1/comments/c1/dislike "));
    }
}
