//! Like and collect buttons for one post.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::lifetime::ViewLifetime;
use crate::models::{CollectResult, LikeResult, PostActions};
use crate::optimistic::{
    ActionController, ActionKey, ActionKind, ActionOutcome, CounterAccess, ToggleCounter,
};
use crate::session::SessionPersistence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionsState {
    pub like: ToggleCounter,
    pub collect: ToggleCounter,
    pub views: u64,
}

impl From<PostActions> for ActionsState {
    fn from(actions: PostActions) -> Self {
        Self {
            like: actions.like_counter(),
            collect: actions.collect_counter(),
            views: actions.views,
        }
    }
}

enum PostCounter {
    Like,
    Collect,
}

impl CounterAccess<ActionsState> for PostCounter {
    fn get(&self, state: &ActionsState) -> Option<ToggleCounter> {
        Some(match self {
            Self::Like => state.like,
            Self::Collect => state.collect,
        })
    }

    fn set(&self, state: &mut ActionsState, counter: ToggleCounter) {
        match self {
            Self::Like => state.like = counter,
            Self::Collect => state.collect = counter,
        }
    }
}

pub struct PostActionsView<S: SessionPersistence> {
    client: ApiClient<S>,
    post_id: String,
    controller: ActionController<ActionsState>,
}

impl<S: SessionPersistence> PostActionsView<S> {
    pub fn new(client: ApiClient<S>, post_id: impl Into<String>, lifetime: ViewLifetime) -> Self {
        Self {
            client,
            post_id: post_id.into(),
            controller: ActionController::with_lifetime(ActionsState::default(), lifetime),
        }
    }

    /// Seeds counters from already-fetched post data.
    pub fn seed(&self, state: ActionsState) {
        self.controller.update(|current| *current = state);
    }

    /// Fetches the counter snapshot from `GET /posts/{id}/actions`.
    pub async fn load(&self) -> ApiResult<ActionsState> {
        let actions = self
            .controller
            .lifetime()
            .guard(self.client.post_actions(&self.post_id))
            .await??;
        self.seed(actions.into());
        Ok(self.state())
    }

    pub fn state(&self) -> ActionsState {
        self.controller.read(|state| *state)
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub async fn toggle_like(&self) -> ApiResult<ActionOutcome> {
        let authenticated = self.client.is_signed_in()?;
        Ok(self
            .controller
            .run(
                ActionKey::new(self.post_id.as_str(), ActionKind::Like),
                authenticated,
                &PostCounter::Like,
                self.client.like_post(&self.post_id),
                |state: &mut ActionsState, result: LikeResult| {
                    state.like = ToggleCounter::new(result.has_liked, result.likes);
                },
            )
            .await)
    }

    pub async fn toggle_collect(&self) -> ApiResult<ActionOutcome> {
        let authenticated = self.client.is_signed_in()?;
        Ok(self
            .controller
            .run(
                ActionKey::new(self.post_id.as_str(), ActionKind::Collect),
                authenticated,
                &PostCounter::Collect,
                self.client.collect_post(&self.post_id),
                |state: &mut ActionsState, result: CollectResult| {
                    state.collect = ToggleCounter::new(result.is_collected, result.collections);
                },
            )
            .await)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::optimistic::ActionPhase;
    use crate::session::{MemorySessionStore, Session};
    use crate::test_support::StubServer;

    fn view(store: MemorySessionStore) -> PostActionsView<MemorySessionStore> {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config, store).unwrap();
        PostActionsView::new(client, "p1", ViewLifetime::new())
    }

    fn signed_in() -> MemorySessionStore {
        MemorySessionStore::with_session(Session::new("tok", "u1"))
    }

    fn served_view(server: &StubServer) -> PostActionsView<MemorySessionStore> {
        let view = PostActionsView::new(server.client(signed_in()), "p1", ViewLifetime::new());
        view.seed(seeded());
        view
    }

    fn seeded() -> ActionsState {
        ActionsState {
            like: ToggleCounter::new(false, 5),
            collect: ToggleCounter::new(true, 2),
            views: 40,
        }
    }

    #[tokio::test]
    async fn like_without_session_is_rejected_untouched() {
        let view = view(MemorySessionStore::new());
        view.seed(seeded());

        let outcome = view.toggle_like().await.unwrap();
        assert!(matches!(outcome, ActionOutcome::AuthRequired));
        assert_eq!(view.state(), seeded());
    }

    #[tokio::test]
    async fn failed_collect_rolls_back_to_snapshot() {
        let view = view(MemorySessionStore::with_session(Session::new("tok", "u1")));
        view.seed(seeded());

        let outcome = view.toggle_collect().await.unwrap();
        assert_eq!(outcome.phase(), ActionPhase::RolledBack);
        assert!(matches!(outcome, ActionOutcome::RolledBack(ApiError::Http(_))));
        assert_eq!(view.state(), seeded());
    }

    #[test]
    fn snapshot_maps_into_counters() {
        let state = ActionsState::from(PostActions {
            likes: 5,
            collections: 2,
            views: 40,
            is_liked: false,
            is_collected: true,
        });
        assert_eq!(state, seeded());
    }

    #[tokio::test]
    async fn like_settles_to_server_counts() {
        let server = StubServer::respond(200, r#"{"likes":6,"hasLiked":true}"#).await;
        let view = served_view(&server);

        let outcome = view.toggle_like().await.unwrap();
        assert!(matches!(outcome, ActionOutcome::Settled));
        assert_eq!(view.state().like, ToggleCounter::new(true, 6));
        assert_eq!(view.state().collect, seeded().collect);

        let request = server.received().await.to_ascii_lowercase();
        assert!(request.starts_with("post /posts/p1/like "));
        assert!(request.contains("authorization: bearer tok"));
    }

    #[tokio::test]
    async fn rejected_like_restores_snapshot() {
        let server = StubServer::respond(401, r#"{"message":"jwt expired"}"#).await;
        let view = served_view(&server);

        let outcome = view.toggle_like().await.unwrap();
        assert!(matches!(
            &outcome,
            ActionOutcome::RolledBack(ApiError::Unauthorized(message)) if message == "jwt expired"
        ));
        assert_eq!(view.state(), seeded());
    }

    #[tokio::test]
    async fn collect_settles_to_server_counts() {
        let server = StubServer::respond(200, r#"{"collections":1,"isCollected":false}"#).await;
        let view = served_view(&server);

        let outcome = view.toggle_collect().await.unwrap();
        assert_eq!(outcome.phase(), ActionPhase::Settled);
        assert_eq!(view.state().collect, ToggleCounter::new(false, 1));
        assert_eq!(view.state().like, seeded().like);
    }
}
