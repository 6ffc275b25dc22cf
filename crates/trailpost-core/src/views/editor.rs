//! Post authoring: create, edit and delete.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::forms::PostDraft;
use crate::session::SessionPersistence;

/// A local image to upload as the post cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct PostEditor<S: SessionPersistence> {
    client: ApiClient<S>,
}

impl<S: SessionPersistence> PostEditor<S> {
    pub const fn new(client: ApiClient<S>) -> Self {
        Self { client }
    }

    /// Publishes a new post and returns its id.
    ///
    /// The draft and session are checked before the cover is uploaded, so an
    /// invalid draft sends nothing.
    pub async fn create(&self, mut draft: PostDraft, cover: Option<CoverUpload>) -> ApiResult<String> {
        draft.validate()?;
        self.require_session()?;
        self.attach_cover(&mut draft, cover).await?;
        let created = self.client.create_post(&draft).await?;
        tracing::info!("Created post {}", created.post_id);
        Ok(created.post_id)
    }

    /// Loads an existing post as a draft. Non-authors get `Forbidden`.
    pub async fn open(&self, post_id: &str) -> ApiResult<PostDraft> {
        let detail = self.client.post_edit_view(post_id).await?;
        Ok(PostDraft {
            title: detail.post.title,
            content: detail.post.content,
            cover_image: detail.post.img_path,
        })
    }

    pub async fn save(
        &self,
        post_id: &str,
        mut draft: PostDraft,
        cover: Option<CoverUpload>,
    ) -> ApiResult<()> {
        draft.validate()?;
        self.require_session()?;
        self.attach_cover(&mut draft, cover).await?;
        self.client.edit_post(post_id, &draft).await?;
        tracing::info!("Saved post {}", post_id);
        Ok(())
    }

    pub async fn delete(&self, post_id: &str) -> ApiResult<()> {
        self.client.delete_post(post_id).await?;
        tracing::info!("Deleted post {}", post_id);
        Ok(())
    }

    fn require_session(&self) -> ApiResult<()> {
        if self.client.is_signed_in()? {
            Ok(())
        } else {
            Err(ApiError::AuthRequired)
        }
    }

    async fn attach_cover(&self, draft: &mut PostDraft, cover: Option<CoverUpload>) -> ApiResult<()> {
        if let Some(cover) = cover {
            let url = self.client.upload_image(&cover.file_name, cover.bytes).await?;
            draft.cover_image = Some(url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::{ApiError, ValidationError};
    use crate::session::MemorySessionStore;

    fn editor() -> PostEditor<MemorySessionStore> {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };
        PostEditor::new(ApiClient::new(&config, MemorySessionStore::new()).unwrap())
    }

    #[tokio::test]
    async fn invalid_draft_skips_the_upload() {
        let draft = PostDraft {
            title: String::new(),
            content: "<p>body</p>".to_string(),
            cover_image: None,
        };
        let cover = CoverUpload {
            file_name: "cover.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            editor().create(draft, Some(cover)).await,
            Err(ApiError::Validation(ValidationError::EmptyTitle))
        ));
    }

    #[tokio::test]
    async fn create_without_session_is_refused() {
        let draft = PostDraft {
            title: "Alps".to_string(),
            content: "<p>snow</p>".to_string(),
            cover_image: None,
        };
        assert!(matches!(
            editor().create(draft, None).await,
            Err(ApiError::AuthRequired)
        ));
    }
}
