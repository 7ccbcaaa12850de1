pub mod client;
pub mod image_processing;
pub mod multipart;
pub mod storage;
