//! Keyword search results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::forms::normalize_keyword;
use crate::lifetime::ViewLifetime;
use crate::models::Post;
use crate::session::SessionPersistence;
use crate::util::{strip_html, truncate_chars};

/// Characters of body text shown per result
pub const EXCERPT_CHARS: usize = 100;

/// Plain-text preview of a rich-text body.
pub fn excerpt(html: &str, max_chars: usize) -> String {
    truncate_chars(strip_html(html).trim(), max_chars)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub cover_image: Option<String>,
    pub excerpt: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Post> for SearchHit {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            cover_image: post.img_path.clone(),
            excerpt: excerpt(&post.content, EXCERPT_CHARS),
            created_at: post.created_at,
        }
    }
}

pub struct SearchView<S: SessionPersistence> {
    client: ApiClient<S>,
    keyword: String,
    hits: Vec<SearchHit>,
    lifetime: ViewLifetime,
}

impl<S: SessionPersistence> SearchView<S> {
    pub fn new(client: ApiClient<S>) -> Self {
        Self {
            client,
            keyword: String::new(),
            hits: Vec::new(),
            lifetime: ViewLifetime::new(),
        }
    }

    /// Runs a search; a blank keyword is a validation error and sends nothing.
    pub async fn search(&mut self, keyword: &str) -> ApiResult<&[SearchHit]> {
        let keyword = normalize_keyword(keyword)?;
        let posts = self
            .lifetime
            .guard(self.client.search_posts(&keyword))
            .await??;
        tracing::debug!("Search for {:?} matched {} posts", keyword, posts.len());
        self.hits = posts.iter().map(SearchHit::from).collect();
        self.keyword = keyword;
        Ok(&self.hits)
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn close(&self) {
        self.lifetime.end();
    }
}
