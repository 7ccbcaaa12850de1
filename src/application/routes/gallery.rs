use axum::http::StatusCode;
use axum::response::Html;

use crate::application::routes::{INGEST_PATH, render_html};
use crate::presentation::web::templates::GalleryTemplate;

#[tracing::instrument]
pub(crate) async fn gallery_page() -> Result<Html<String>, StatusCode> {
    render_html(GalleryTemplate {
        upload_path: INGEST_PATH,
    })
}
