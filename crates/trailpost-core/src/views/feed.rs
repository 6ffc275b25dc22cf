//! Home feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::lifetime::ViewLifetime;
use crate::models::{sort_newest_first, Post};
use crate::session::SessionPersistence;

/// What a feed card shows for one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: String,
    /// Title cut to card width
    pub title: String,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub likes: u64,
    pub collections: u64,
    pub views: u64,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.card_title(),
            cover_image: post.img_path.clone(),
            author: post
                .author
                .as_ref()
                .and_then(|author| author.username())
                .map(str::to_string),
            created_at: post.created_at,
            likes: post.likes,
            collections: post.collections,
            views: post.views,
        }
    }
}

/// Newest-first post list revealed in fixed-size batches.
#[derive(Debug, Clone, Default)]
pub struct PostWindow {
    posts: Vec<Post>,
    visible: usize,
    batch_size: usize,
}

impl PostWindow {
    pub fn new(batch_size: usize) -> Self {
        Self {
            posts: Vec::new(),
            visible: 0,
            batch_size: batch_size.max(1),
        }
    }

    /// Replaces the contents and shows the first batch.
    pub fn replace(&mut self, mut posts: Vec<Post>) {
        sort_newest_first(&mut posts);
        self.visible = self.batch_size.min(posts.len());
        self.posts = posts;
    }

    pub fn visible(&self) -> &[Post] {
        &self.posts[..self.visible]
    }

    pub fn cards(&self) -> Vec<PostCard> {
        self.visible().iter().map(PostCard::from).collect()
    }

    pub fn total(&self) -> usize {
        self.posts.len()
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.posts.len()
    }

    /// Reveals the next batch and returns how many posts became visible.
    pub fn load_more(&mut self) -> usize {
        let before = self.visible;
        self.visible = (self.visible + self.batch_size).min(self.posts.len());
        self.visible - before
    }
}

pub struct FeedView<S: SessionPersistence> {
    client: ApiClient<S>,
    window: PostWindow,
    lifetime: ViewLifetime,
}

impl<S: SessionPersistence> FeedView<S> {
    pub fn new(client: ApiClient<S>, batch_size: usize) -> Self {
        Self {
            client,
            window: PostWindow::new(batch_size),
            lifetime: ViewLifetime::new(),
        }
    }

    pub async fn load(&mut self) -> ApiResult<()> {
        let posts = self.lifetime.guard(self.client.feed()).await??;
        tracing::debug!("Loaded {} feed posts", posts.len());
        self.window.replace(posts);
        Ok(())
    }

    pub const fn window(&self) -> &PostWindow {
        &self.window
    }

    pub fn load_more(&mut self) -> usize {
        self.window.load_more()
    }

    pub const fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    pub fn close(&self) {
        self.lifetime.end();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn post(index: u32) -> Post {
        serde_json::from_value(serde_json::json!({
            "_id": format!("p{index}"),
            "title": format!("Trip number {index} along the coast"),
            "user_id": {"_id": "u1", "username": "ana"},
            "Creation_time": Utc.with_ymd_and_hms(2024, 1, 1, 0, index, 0).unwrap(),
        }))
        .unwrap()
    }

    #[test]
    fn window_shows_newest_batch_and_grows() {
        let mut window = PostWindow::new(12);
        window.replace((0..30).map(post).collect());

        assert_eq!(window.visible().len(), 12);
        assert_eq!(window.visible()[0].id, "p29");
        assert!(window.has_more());

        assert_eq!(window.load_more(), 12);
        assert_eq!(window.load_more(), 6);
        assert_eq!(window.load_more(), 0);
        assert!(!window.has_more());
        assert_eq!(window.total(), 30);
    }

    #[test]
    fn cards_truncate_titles_and_resolve_author() {
        let mut window = PostWindow::new(12);
        window.replace(vec![post(3)]);
        let card = &window.cards()[0];
        assert_eq!(card.title, "Trip number 3 along ...");
        assert_eq!(card.author.as_deref(), Some("ana"));
    }

    #[tokio::test]
    async fn closed_feed_does_not_load() {
        use crate::config::ClientConfig;
        use crate::error::ApiError;
        use crate::session::MemorySessionStore;

        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config, MemorySessionStore::new()).unwrap();
        let mut feed = FeedView::new(client, 12);
        feed.close();
        assert!(matches!(feed.load().await, Err(ApiError::Cancelled)));
        assert_eq!(feed.window().total(), 0);
    }
}
