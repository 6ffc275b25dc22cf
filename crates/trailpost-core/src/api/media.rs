//! Image upload.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::UploadedImage;
use crate::session::SessionPersistence;

impl<S: SessionPersistence> ApiClient<S> {
    /// Uploads an image as multipart field `image` and returns its public URL.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let request = self.build_upload_request(file_name, bytes)?;
        let uploaded: UploadedImage = self.execute(request).await?;
        Ok(uploaded.image_url)
    }
}
