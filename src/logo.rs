//! Best-effort loading of the header logo.
//!
//! A logo is decoration: when it cannot be read, downloaded or decoded the failure is
//! logged and the document is produced without it.

use crate::image::Image;
use crate::ComposeError;
use log::{debug, warn};
use serde::Deserialize;
use std::path::PathBuf;

/// Where the header logo comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoSource {
    /// A PNG or JPEG file on disk
    Path(PathBuf),
    /// An http(s) URL; only fetched with the `remote-logo` feature
    Url(String),
}

/// Fetch and decode the logo, or [None] if anything goes wrong
pub async fn fetch_logo(source: &LogoSource) -> Option<Image> {
    let bytes = match read_source(source).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("skipping logo from {source:?}: {e}");
            return None;
        }
    };
    match Image::from_bytes(bytes) {
        Ok(image) => {
            debug!("loaded {}x{} logo from {source:?}", image.width, image.height);
            Some(image)
        }
        Err(e) => {
            warn!("skipping undecodable logo from {source:?}: {e}");
            None
        }
    }
}

async fn read_source(source: &LogoSource) -> Result<Vec<u8>, ComposeError> {
    match source {
        LogoSource::Path(path) => Ok(tokio::fs::read(path).await?),
        LogoSource::Url(url) => download(url).await,
    }
}

#[cfg(feature = "remote-logo")]
async fn download(url: &str) -> Result<Vec<u8>, ComposeError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(not(feature = "remote-logo"))]
async fn download(url: &str) -> Result<Vec<u8>, ComposeError> {
    Err(ComposeError::LogoUnavailable(format!(
        "{url} needs the remote-logo feature"
    )))
}
