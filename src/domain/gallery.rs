use serde::{Deserialize, Serialize};

/// Builds client-facing links for stored keys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicUrls {
    base_url: String,
}

impl PublicUrls {
    /// Virtual-hosted S3 address: `https://<bucket>.s3.<region>.amazonaws.com`.
    pub fn for_s3_bucket(bucket: &str, region: &str) -> Self {
        Self {
            base_url: format!("https://{bucket}.s3.{region}.amazonaws.com"),
        }
    }

    /// An explicit base such as a CDN or an S3-compatible endpoint.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.base_url)
    }
}

/// Public URLs of every stored original, in store enumeration order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryListing {
    pub all_images: Vec<String>,
}

impl GalleryListing {
    pub fn from_keys<I>(urls: &PublicUrls, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            all_images: keys
                .into_iter()
                .map(|key| urls.url_for(key.as_ref()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub original_url: String,
    pub cropped_url: String,
    pub all_images: Vec<String>,
}
