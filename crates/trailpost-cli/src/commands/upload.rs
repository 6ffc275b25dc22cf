use std::path::Path;

use crate::commands::common::Context;
use crate::error::CliError;

pub async fn run_upload(context: &Context, path: &Path) -> Result<(), CliError> {
    let (file_name, bytes) = read_upload(path)?;
    let url = context.client.upload_image(&file_name, bytes).await?;
    println!("{url}");
    Ok(())
}

/// File name and contents of a local image.
pub fn read_upload(path: &Path) -> Result<(String, Vec<u8>), CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |name| name.to_string_lossy().into_owned());
    Ok((file_name, bytes))
}
