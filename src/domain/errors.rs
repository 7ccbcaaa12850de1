use thiserror::Error;

/// Failure reported by the object store. Displays as the backend's own
/// message; the key or prefix is carried for logging.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{message}")]
    Put { key: String, message: String },
    #[error("{message}")]
    List { prefix: String, message: String },
}

impl StorageError {
    /// The object key or listing prefix the failed call targeted.
    pub fn target(&self) -> &str {
        match self {
            Self::Put { key, .. } => key,
            Self::List { prefix, .. } => prefix,
        }
    }

    pub fn put(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Put {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn list(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        Self::List {
            prefix: prefix.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("invalid target size {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
}
