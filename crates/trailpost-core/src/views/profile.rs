//! A member's profile page and their posts.

use chrono::{DateTime, Utc};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::forms::normalize_identifier;
use crate::lifetime::ViewLifetime;
use crate::models::User;
use crate::session::SessionPersistence;

use super::feed::PostWindow;

pub struct ProfileView<S: SessionPersistence> {
    client: ApiClient<S>,
    user_id: String,
    user: Option<User>,
    posts: PostWindow,
    lifetime: ViewLifetime,
}

impl<S: SessionPersistence> ProfileView<S> {
    pub fn new(client: ApiClient<S>, user_id: &str, batch_size: usize) -> ApiResult<Self> {
        Ok(Self {
            client,
            user_id: normalize_identifier("User", user_id)?,
            user: None,
            posts: PostWindow::new(batch_size),
            lifetime: ViewLifetime::new(),
        })
    }

    /// Fetches the member and their posts together.
    pub async fn load(&mut self) -> ApiResult<()> {
        let (user, posts) = tokio::join!(
            self.lifetime.guard(self.client.user_by_id(&self.user_id)),
            self.lifetime.guard(self.client.posts_by_user(&self.user_id)),
        );
        let user = user??;
        let posts = posts??;
        tracing::debug!("Loaded profile {} with {} posts", user.username, posts.len());
        self.user = Some(user);
        self.posts.replace(posts);
        Ok(())
    }

    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub const fn posts(&self) -> &PostWindow {
        &self.posts
    }

    pub fn load_more(&mut self) -> usize {
        self.posts.load_more()
    }

    /// Days since the member joined, for the "member for" line.
    pub fn member_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.user.as_ref()?.days_since_joined(now)
    }

    pub fn close(&self) {
        self.lifetime.end();
    }
}
