pub mod errors;
pub mod gallery;
pub mod images;
pub mod repositories;

// Re-exports
pub use errors::{StorageError, TransformError};
pub use gallery::{GalleryListing, PublicUrls, UploadOutcome};
pub use images::{GeneratedName, ImageVariant, StoredImage, UploadedFile};
pub use repositories::{ImageTransform, ObjectStore};
