use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::services::UploadPolicy;
use crate::application::state::{AppState, AppStateConfig};
use crate::domain::gallery::PublicUrls;
use crate::domain::repositories::ObjectStore;
use crate::infrastructure::image_processing::CoverCropTransform;
use crate::infrastructure::storage::{InMemoryObjectStore, S3Config, S3ObjectStore};

/// Base URL reported for objects held by the in-memory store.
const MEMORY_BASE_URL: &str = "http://localhost/snapcrop";

#[derive(Clone, Debug)]
pub enum StoreBackend {
    S3(S3Config),
    Memory,
}

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub store: StoreBackend,
    pub public_base_url: Option<String>,
    pub stored_content_type: String,
    pub max_upload_bytes: usize,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let (store, public_urls) = build_store(&config).await;

    let state = AppState::new(AppStateConfig {
        store,
        transform: Arc::new(CoverCropTransform::default()),
        public_urls,
        policy: UploadPolicy {
            stored_content_type: config.stored_content_type.clone(),
            ..UploadPolicy::default()
        },
        max_upload_bytes: config.max_upload_bytes,
    });

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    info!(
        address = %config.bind_address,
        base_url = %state.ingest.urls().base_url(),
        max_upload_bytes = config.max_upload_bytes,
        "starting HTTP server"
    );

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

async fn build_store(config: &ServerConfig) -> (Arc<dyn ObjectStore>, PublicUrls) {
    match &config.store {
        StoreBackend::S3(s3) => {
            let store = S3ObjectStore::connect(s3).await;
            let urls = config
                .public_base_url
                .as_deref()
                .map(PublicUrls::with_base_url)
                .unwrap_or_else(|| PublicUrls::for_s3_bucket(&s3.bucket, &s3.region));
            (Arc::new(store), urls)
        }
        StoreBackend::Memory => {
            warn!("using in-memory object store - uploads are lost on shutdown");
            let urls = PublicUrls::with_base_url(
                config.public_base_url.as_deref().unwrap_or(MEMORY_BASE_URL),
            );
            (Arc::new(InMemoryObjectStore::new()), urls)
        }
    }
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
