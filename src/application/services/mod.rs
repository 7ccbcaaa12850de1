mod ingest;

pub use ingest::{IngestService, UploadPolicy};
