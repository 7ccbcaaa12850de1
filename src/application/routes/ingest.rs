use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::debug;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::gallery::UploadOutcome;
use crate::infrastructure::multipart::{decode_transport_body, extract_file, legacy_json_body};

const FETCH_ONLY_PARAM: &str = "fetchOnly";

/// Plain-HTTP stand-in for a gateway's "body is base64" flag.
const TRANSFER_ENCODING_HEADER: &str = "content-transfer-encoding";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IngestAction {
    Preflight,
    ListOriginals,
    UploadAndCrop,
}

impl IngestAction {
    /// Anything that is neither a preflight nor a listing is an upload,
    /// whatever its method.
    pub fn select(method: &Method, query: Option<&str>) -> Self {
        if *method == Method::OPTIONS {
            Self::Preflight
        } else if *method == Method::GET && is_fetch_only(query) {
            Self::ListOriginals
        } else {
            Self::UploadAndCrop
        }
    }
}

#[tracing::instrument(skip(state, query, headers, body))]
pub(crate) async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    match IngestAction::select(&method, query.as_deref()) {
        IngestAction::Preflight => Ok(StatusCode::OK.into_response()),
        IngestAction::ListOriginals => {
            let listing = state
                .ingest
                .list_originals()
                .await
                .map_err(AppError::from)?;
            Ok(Json(listing).into_response())
        }
        IngestAction::UploadAndCrop => {
            let outcome = upload_and_crop(&state, &headers, body).await?;
            Ok(Json(outcome).into_response())
        }
    }
}

async fn upload_and_crop(
    state: &AppState,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<UploadOutcome, AppError> {
    let raw = decode_transport_body(body?, is_base64_encoded(headers))?;

    let legacy = legacy_json_body(&raw);
    debug!(
        json_fields = legacy.as_object().map_or(0, |fields| fields.len()),
        "secondary JSON parse"
    );

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let file = extract_file(raw, content_type)
        .await?
        .ok_or_else(|| AppError::validation("no file field found in multipart body"))?;

    state.ingest.upload_and_crop(file).await
}

fn is_fetch_only(query: Option<&str>) -> bool {
    query.is_some_and(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .any(|(key, value)| key == FETCH_ONLY_PARAM && value == "true")
    })
}

fn is_base64_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(TRANSFER_ENCODING_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("base64"))
}
