//! Retrieval of the raw survey export.
//!
//! A source is either an `http(s)://` URL or a local path. Either way the
//! whole body is read into memory in one shot; there is no retry or timeout
//! policy here.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::LoadError;
use tracing::debug;

/// GETs `url` and returns the body. Non-success statuses are fetch failures.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, LoadError> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| LoadError::fetch(url, e))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| LoadError::fetch(url, e))?;

    let bytes = resp.bytes().await.map_err(|e| LoadError::fetch(url, e))?;
    debug!(url, bytes = bytes.len(), "Survey export downloaded");
    Ok(bytes.to_vec())
}

/// Returns `true` when `source` should be fetched over HTTP rather than read
/// from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads the export from a local file path or fetches it over HTTP.
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>, LoadError> {
    if is_remote(source) {
        fetch_bytes(client, source).await
    } else {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| LoadError::fetch(source, e))?;
        debug!(path = source, bytes = bytes.len(), "Survey export read from disk");
        Ok(bytes)
    }
}
