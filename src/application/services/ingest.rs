use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::application::errors::AppError;
use crate::domain::StorageError;
use crate::domain::gallery::{GalleryListing, PublicUrls, UploadOutcome};
use crate::domain::images::{CROP_SIZE, ImageVariant, StoredImage, UploadedFile};
use crate::domain::repositories::{ImageTransform, ObjectStore};

/// Stored-object settings applied to every upload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UploadPolicy {
    /// Content type recorded for both objects, whatever the bytes are.
    pub stored_content_type: String,
    pub crop_width: u32,
    pub crop_height: u32,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            stored_content_type: "image/jpeg".to_string(),
            crop_width: CROP_SIZE,
            crop_height: CROP_SIZE,
        }
    }
}

#[derive(Clone)]
pub struct IngestService {
    store: Arc<dyn ObjectStore>,
    transform: Arc<dyn ImageTransform>,
    urls: PublicUrls,
    policy: UploadPolicy,
}

impl IngestService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        transform: Arc<dyn ImageTransform>,
        urls: PublicUrls,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            store,
            transform,
            urls,
            policy,
        }
    }

    pub fn urls(&self) -> &PublicUrls {
        &self.urls
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_originals(&self) -> Result<GalleryListing, StorageError> {
        let keys = self
            .store
            .list_by_prefix(ImageVariant::Original.prefix())
            .await?;
        Ok(GalleryListing::from_keys(&self.urls, keys))
    }

    /// Store the original, derive and store the crop, then report both URLs
    /// with the refreshed listing. Steps run strictly in order and the first
    /// failure aborts the rest; objects already written stay in place.
    #[tracing::instrument(
        skip(self, file),
        fields(generated_name = %file.generated_name, size = file.data.len())
    )]
    pub async fn upload_and_crop(&self, file: UploadedFile) -> Result<UploadOutcome, AppError> {
        if file.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }

        let name = file.generated_name;
        let content_type = self.policy.stored_content_type.as_str();

        let original = StoredImage::new(ImageVariant::Original, &name, file.data, content_type);
        self.store.put_image(&original).await?;
        info!(key = %original.key, "stored original");

        let cropped_data = self.crop(original.data.clone()).await?;
        let cropped = StoredImage::new(
            ImageVariant::Cropped,
            &name,
            Bytes::from(cropped_data),
            content_type,
        );
        self.store.put_image(&cropped).await?;
        info!(key = %cropped.key, "stored cropped derivative");

        let listing = self.list_originals().await?;

        Ok(UploadOutcome {
            original_url: self.urls.url_for(&original.key),
            cropped_url: self.urls.url_for(&cropped.key),
            all_images: listing.all_images,
        })
    }

    async fn crop(&self, data: Bytes) -> Result<Vec<u8>, AppError> {
        let transform = Arc::clone(&self.transform);
        let (width, height) = (self.policy.crop_width, self.policy.crop_height);

        tokio::task::spawn_blocking(move || transform.resize_cover_crop(&data, width, height))
            .await
            .map_err(|e| AppError::unexpected(format!("image transform task failed: {e}")))?
            .map_err(AppError::from)
    }
}
