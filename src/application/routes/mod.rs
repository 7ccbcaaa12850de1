pub mod gallery;
pub mod ingest;

use askama::Template;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{HeaderName, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderValue, Request, StatusCode};
use axum::response::Html;
use axum::routing::{any, get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span, error};

use crate::application::state::AppState;
use crate::presentation::web::templates::render_template;

/// Path of the single ingestion endpoint.
pub const INGEST_PATH: &str = "/upload";

/// Static CORS headers attached to every ingest response.
pub const CORS_HEADERS: [(&str, &str); 5] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    (
        "access-control-allow-headers",
        "Content-Type, X-Amz-Date, Authorization, X-Api-Key, X-Amz-Security-Token",
    ),
    ("access-control-max-age", "86400"),
    ("access-control-allow-credentials", "false"),
];

pub fn app_router(state: AppState) -> axum::Router {
    let max_upload_bytes = state.max_upload_bytes;

    axum::Router::new()
        .route("/", get(gallery::gallery_page))
        .merge(ingest_router(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(SnapcropMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(SetResponseHeaderLayer::overriding(
                    X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(CompressionLayer::new().gzip(true)),
        )
        .with_state(state)
}

fn ingest_router(max_upload_bytes: usize) -> axum::Router<AppState> {
    let [origin, methods, headers, max_age, credentials] = CORS_HEADERS.map(cors_header);

    // The limit is enforced when the handler buffers the body, so an
    // oversized upload is answered with the JSON error body.
    axum::Router::new()
        .route(INGEST_PATH, any(ingest::dispatch))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(origin)
                .layer(methods)
                .layer(headers)
                .layer(max_age)
                .layer(credentials),
        )
}

fn cors_header((name, value): (&'static str, &'static str)) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

#[derive(Clone)]
struct SnapcropMakeSpan;

impl<B> MakeSpan<B> for SnapcropMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

pub(crate) fn render_html<T: Template>(template: T) -> Result<Html<String>, StatusCode> {
    render_template(template).map(Html).map_err(|err| {
        error!(error = %err, "failed to render template");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
