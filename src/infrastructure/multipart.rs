use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tracing::debug;

use crate::domain::UploadedFile;

#[derive(Debug, Error)]
pub enum MultipartError {
    #[error("invalid multipart content type: {0}")]
    Boundary(String),
    #[error("request body is not valid base64: {0}")]
    TransportEncoding(String),
    #[error("malformed multipart body: {0}")]
    Malformed(String),
}

/// Undo the transport encoding of a request body.
///
/// Gateways that cannot pass binary through hand the body over as base64;
/// anything else is already raw.
pub fn decode_transport_body(body: Bytes, base64_encoded: bool) -> Result<Bytes, MultipartError> {
    if !base64_encoded {
        return Ok(body);
    }

    let compact: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact)
        .map(Bytes::from)
        .map_err(|e| MultipartError::TransportEncoding(e.to_string()))
}

/// Best-effort JSON view of the decoded body. Falls back to an empty object;
/// the upload path never reads it.
pub fn legacy_json_body(raw: &[u8]) -> serde_json::Value {
    serde_json::from_slice(raw).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
}

/// Pull the file part out of a `multipart/form-data` body.
///
/// Parts without a filename are skipped. When more than one file part is
/// present the last one wins, and only that part's chunks are kept.
pub async fn extract_file(
    raw: Bytes,
    content_type: &str,
) -> Result<Option<UploadedFile>, MultipartError> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|e| MultipartError::Boundary(e.to_string()))?;

    let body = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(raw) });
    let mut multipart = multer::Multipart::new(body, boundary);

    let mut accepted: Option<UploadedFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| MultipartError::Malformed(e.to_string()))?
    {
        let Some(client_filename) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "skipping non-file part");
            continue;
        };
        let field_name = field.name().map(str::to_string);

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| MultipartError::Malformed(e.to_string()))?
        {
            buffer.extend_from_slice(&chunk);
        }

        if let Some(previous) = &accepted {
            debug!(
                replaced = %previous.generated_name,
                "later file part replaces earlier one"
            );
        }

        accepted = Some(UploadedFile::new(
            field_name,
            Some(client_filename),
            buffer.freeze(),
        ));
    }

    Ok(accepted)
}
