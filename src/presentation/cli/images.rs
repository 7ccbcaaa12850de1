use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::print_json;
use crate::infrastructure::client::SnapcropClient;

#[derive(Debug, Args)]
pub struct UploadCommand {
    /// Path to a JPEG, PNG, GIF or WebP file
    pub file: PathBuf,
}

pub async fn upload(client: &SnapcropClient, cmd: UploadCommand) -> Result<()> {
    let outcome = client.images().upload_file(&cmd.file).await?;
    print_json(&outcome)
}

pub async fn list(client: &SnapcropClient) -> Result<()> {
    let listing = client.images().list().await?;
    print_json(&listing)
}
