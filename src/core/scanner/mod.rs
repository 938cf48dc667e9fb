// src/core/scanner/mod.rs

pub mod fingerprint_scanner;
pub mod firewall_scanner;
pub mod pipeline;
pub mod quality_scanner;
pub mod tls_scanner;

use crate::core::error::ScanError;
use crate::core::target::Target;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::{debug, error};
use url::Url;

/// Joins `path` onto an API base URL, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Fetches the target's site root and returns its headers.
///
/// Any HTTP status is accepted: an error page still says something about the
/// server in front of it.
pub(crate) async fn fetch_site_headers(client: &Client, target: &Target) -> Result<HeaderMap, ScanError> {
    let response = client
        .get(target.site_root())
        .send()
        .await
        .map_err(ScanError::TargetFetch)?;
    debug!(status = %response.status(), "Received response from target.");
    Ok(response.headers().clone())
}

/// Fetches the target's site root and returns its headers and body text.
pub(crate) async fn fetch_site(client: &Client, target: &Target) -> Result<(HeaderMap, String), ScanError> {
    let url = target.site_root();
    let response = client.get(&url).send().await.map_err(|e| {
        error!(url = %url, error = %e, "HTTP request to target failed");
        ScanError::TargetFetch(e)
    })?;
    debug!(status = %response.status(), "Received response from target.");

    let headers = response.headers().clone();
    let body = response.text().await.map_err(|e| {
        error!(error = %e, "Failed to read response body");
        ScanError::TargetFetch(e)
    })?;
    debug!(bytes = body.len(), "Read response body.");
    Ok((headers, body))
}
