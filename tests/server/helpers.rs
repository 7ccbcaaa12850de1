use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use snapcrop::application::routes::app_router;
use snapcrop::application::services::UploadPolicy;
use snapcrop::application::state::{AppState, AppStateConfig};
use snapcrop::domain::gallery::PublicUrls;
use snapcrop::domain::repositories::{ImageTransform, ObjectStore};
use snapcrop::domain::{StorageError, TransformError};
use snapcrop::infrastructure::image_processing::CoverCropTransform;
use snapcrop::infrastructure::storage::InMemoryObjectStore;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub const BASE_URL: &str = "https://photos.s3.eu-west-1.amazonaws.com";
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryObjectStore>,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.address)
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// Server backed by an in-memory store and the real cover-crop transform.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryObjectStore::new());
    let config = test_state_config(store.clone(), Arc::new(CoverCropTransform::default()));
    let (address, server_handle) = serve(AppState::new(config)).await;

    TestApp {
        address,
        store,
        server_handle,
    }
}

/// Server whose store is `store` instead of the default in-memory one. The
/// returned `TestApp::store` stays empty.
pub async fn spawn_app_with(
    store: Arc<dyn ObjectStore>,
    transform: Arc<dyn ImageTransform>,
) -> TestApp {
    let mut config = test_state_config(Arc::new(InMemoryObjectStore::new()), transform);
    config.store = store;
    let (address, server_handle) = serve(AppState::new(config)).await;

    TestApp {
        address,
        store: Arc::new(InMemoryObjectStore::new()),
        server_handle,
    }
}

fn test_state_config(
    store: Arc<InMemoryObjectStore>,
    transform: Arc<dyn ImageTransform>,
) -> AppStateConfig {
    AppStateConfig {
        store,
        transform,
        public_urls: PublicUrls::with_base_url(BASE_URL),
        policy: UploadPolicy::default(),
        max_upload_bytes: MAX_UPLOAD_BYTES,
    }
}

async fn serve(state: AppState) -> (String, AbortHandle) {
    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{}", local_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    (address, server_handle)
}

/// Encode a solid-red PNG of the given size.
pub fn red_png(width: u32, height: u32) -> Vec<u8> {
    use image::{ImageBuffer, Rgba};

    let img = ImageBuffer::from_pixel(width, height, Rgba([255u8, 0, 0, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        width,
        height,
        image::ColorType::Rgba8.into(),
    )
    .expect("failed to encode test PNG");
    buf
}

pub fn image_form(filename: &str, data: Vec<u8>) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(data)
        .file_name(filename.to_string())
        .mime_str("image/png")
        .expect("valid mime type");
    reqwest::multipart::Form::new().part("file", part)
}

pub fn assert_cors_headers(response: &reqwest::Response) {
    let expected = [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "GET, POST, OPTIONS"),
        (
            "access-control-allow-headers",
            "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token",
        ),
        ("access-control-max-age", "86400"),
        ("access-control-allow-credentials", "false"),
    ];

    for (name, value) in expected {
        assert_eq!(
            response.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "missing or wrong {name} header"
        );
    }
}

/// Assert the response carries the JSON error contract and return its message.
pub async fn json_error(response: reqwest::Response) -> String {
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let body: serde_json::Value = response.json().await.expect("valid JSON body");
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("missing error field in {body}"))
        .to_string()
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put(&self, key: &str, _data: Bytes, _content_type: &str) -> Result<(), StorageError> {
        Err(StorageError::put(key, "access denied"))
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(StorageError::list(prefix, "access denied"))
    }
}

/// Store that returns a fixed listing and accepts writes without keeping them.
pub struct FixedListingStore {
    pub keys: Vec<String>,
}

#[async_trait]
impl ObjectStore for FixedListingStore {
    async fn put(&self, _key: &str, _data: Bytes, _content_type: &str) -> Result<(), StorageError> {
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Transform that counts invocations and returns a fixed payload.
#[derive(Default)]
pub struct CountingTransform {
    calls: AtomicUsize,
}

impl CountingTransform {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageTransform for CountingTransform {
    fn resize_cover_crop(
        &self,
        _data: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<u8>, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(b"cropped".to_vec())
    }
}
