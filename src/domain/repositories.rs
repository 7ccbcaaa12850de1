use async_trait::async_trait;
use bytes::Bytes;

use super::{StorageError, TransformError};
use crate::domain::images::StoredImage;

/// Key/value blob store with list-by-prefix.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// Keys beginning with `prefix`, in the backend's native order.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    async fn put_image(&self, image: &StoredImage) -> Result<(), StorageError> {
        self.put(&image.key, image.data.clone(), &image.content_type)
            .await
    }
}

/// Pure resize primitive: scale to cover `width` x `height`, then crop the
/// overflow around the center.
pub trait ImageTransform: Send + Sync {
    fn resize_cover_crop(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, TransformError>;
}
