use std::sync::Arc;

use crate::application::services::{IngestService, UploadPolicy};
use crate::domain::gallery::PublicUrls;
use crate::domain::repositories::{ImageTransform, ObjectStore};

/// Everything that varies between production and test environments. The
/// ingest service is assembled from these pieces.
pub struct AppStateConfig {
    pub store: Arc<dyn ObjectStore>,
    pub transform: Arc<dyn ImageTransform>,
    pub public_urls: PublicUrls,
    pub policy: UploadPolicy,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub ingest: IngestService,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: AppStateConfig) -> Self {
        let ingest = IngestService::new(
            config.store,
            config.transform,
            config.public_urls,
            config.policy,
        );

        Self {
            ingest,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
