use std::fmt;

use bytes::Bytes;
use uuid::Uuid;

/// Filename used when the client sends a file part without one.
pub const FALLBACK_FILENAME: &str = "upload.jpg";

/// Edge length of the square derivative produced for every upload.
pub const CROP_SIZE: u32 = 300;

/// The two kinds of object written per upload. They share a generated name
/// and differ only in key prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageVariant {
    Original,
    Cropped,
}

impl ImageVariant {
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Original => "originals/",
            Self::Cropped => "cropped/",
        }
    }

    pub fn key(self, name: &GeneratedName) -> String {
        format!("{}{}", self.prefix(), name)
    }
}

/// Storage-key suffix: a fresh UUID joined to the client's filename.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedName(String);

impl GeneratedName {
    pub fn new(client_filename: Option<&str>) -> Self {
        Self::with_token(Uuid::new_v4(), client_filename)
    }

    pub fn with_token(token: Uuid, client_filename: Option<&str>) -> Self {
        let filename = client_filename
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILENAME);
        Self(format!("{token}-{filename}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The file part accepted from a multipart upload. Lives for one request.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub field_name: Option<String>,
    pub client_filename: Option<String>,
    pub generated_name: GeneratedName,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(field_name: Option<String>, client_filename: Option<String>, data: Bytes) -> Self {
        let generated_name = GeneratedName::new(client_filename.as_deref());
        Self {
            field_name,
            client_filename,
            generated_name,
            data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A blob as written to the object store.
#[derive(Clone, Debug)]
pub struct StoredImage {
    pub key: String,
    pub data: Bytes,
    pub content_type: String,
}

impl StoredImage {
    pub fn new(
        variant: ImageVariant,
        name: &GeneratedName,
        data: Bytes,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            key: variant.key(name),
            data,
            content_type: content_type.into(),
        }
    }
}
