use std::path::Path;

use anyhow::{Context, Result, bail};
use reqwest::multipart::{Form, Part};

use super::SnapcropClient;
use crate::domain::gallery::{GalleryListing, UploadOutcome};
use crate::domain::images::FALLBACK_FILENAME;

const UPLOAD_PATH: &str = "upload";

pub struct ImagesClient<'a> {
    client: &'a SnapcropClient,
}

impl<'a> ImagesClient<'a> {
    pub fn new(client: &'a SnapcropClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<GalleryListing> {
        let mut url = self.client.endpoint(UPLOAD_PATH)?;
        url.query_pairs_mut().append_pair("fetchOnly", "true");
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn upload_file(&self, path: &Path) -> Result<UploadOutcome> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(FALLBACK_FILENAME)
            .to_string();
        let data =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        self.upload_bytes(filename, data).await
    }

    pub async fn upload_bytes(&self, filename: String, data: Vec<u8>) -> Result<UploadOutcome> {
        let Some(mime) = image_mime_type(&filename) else {
            bail!("only image files are allowed: {filename}");
        };

        let part = Part::bytes(data).file_name(filename).mime_str(mime)?;
        let form = Form::new().part("file", part);

        let url = self.client.endpoint(UPLOAD_PATH)?;
        let response = self
            .client
            .request(reqwest::Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}

fn image_mime_type(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_ascii_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
