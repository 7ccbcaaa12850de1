pub mod images;

use std::net::SocketAddr;

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::application::{ServerConfig, StoreBackend};
use crate::infrastructure::storage::S3Config;
use images::UploadCommand;

/// 10 MiB, the largest body most API gateways accept.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(author, version, about = "Store uploaded images with a square crop and list the gallery", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "SNAPCROP_URL",
        default_value = "http://localhost:3000"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Upload an image and print the resulting URLs
    Upload(UploadCommand),

    /// List the public URLs of all stored originals
    List,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StoreKind {
    S3,
    Memory,
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "SNAPCROP_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    #[arg(long, env = "SNAPCROP_STORE", value_enum, default_value = "s3")]
    pub store: StoreKind,

    #[arg(long, env = "BUCKET_NAME")]
    pub bucket: Option<String>,

    #[arg(long, env = "AWS_REGION", default_value = "eu-west-1")]
    pub region: String,

    /// Endpoint of an S3-compatible service (MinIO, R2, ...)
    #[arg(long, env = "SNAPCROP_S3_ENDPOINT")]
    pub endpoint_url: Option<String>,

    /// Prefix for object URLs; defaults to the bucket's S3 address
    #[arg(long, env = "SNAPCROP_PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    #[arg(long, env = "SNAPCROP_STORED_CONTENT_TYPE", default_value = "image/jpeg")]
    pub stored_content_type: String,

    #[arg(long, env = "SNAPCROP_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServeCommand {
    pub fn into_config(self) -> anyhow::Result<ServerConfig> {
        let store = match self.store {
            StoreKind::S3 => {
                let Some(bucket) = self.bucket.filter(|b| !b.trim().is_empty()) else {
                    bail!("--bucket (or BUCKET_NAME) is required for the s3 store");
                };
                StoreBackend::S3(S3Config {
                    bucket,
                    region: self.region,
                    endpoint_url: self.endpoint_url,
                })
            }
            StoreKind::Memory => StoreBackend::Memory,
        };

        Ok(ServerConfig {
            bind_address: self.bind_address,
            store,
            public_base_url: self.public_base_url,
            stored_content_type: self.stored_content_type,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
