// src/core/scanner/quality_scanner.rs

use crate::core::error::ScanError;
use crate::core::models::{PageSpeedResponse, QualityReport};
use crate::core::target::Target;
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::{debug, error, info};
use url::Url;

/// Lighthouse categories requested from PageSpeed, as `(query value, result key)`.
const CATEGORIES: &[(&str, &str)] = &[
    ("PERFORMANCE", "performance"),
    ("ACCESSIBILITY", "accessibility"),
    ("BEST_PRACTICES", "best-practices"),
    ("SEO", "seo"),
];

/// Runs a mobile Lighthouse audit through PageSpeed Insights and projects the
/// category scores.
pub async fn run_quality_scan(
    client: &Client,
    api: &Url,
    api_key: &str,
    target: &Target,
) -> Result<QualityReport, ScanError> {
    info!(url = %target.url(), "Starting PageSpeed scan.");

    let mut query: Vec<(&str, &str)> = vec![("url", target.url().as_str()), ("strategy", "mobile")];
    query.extend(CATEGORIES.iter().map(|(param, _)| ("category", *param)));
    query.push(("key", api_key));

    let response: PageSpeedResponse = client
        .get(api.clone())
        .query(&query)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            // The URL carries the API key; log the status only.
            error!(status = ?e.status(), "PageSpeed request failed");
            ScanError::PageSpeedRequest(e.without_url())
        })?
        .json()
        .await
        .map_err(|e| ScanError::PageSpeedRequest(e.without_url()))?;

    let lighthouse = response.lighthouse_result.ok_or(ScanError::MissingLighthouseResult)?;

    let scores: BTreeMap<String, Option<f64>> = CATEGORIES
        .iter()
        .map(|(_, key)| {
            let score = lighthouse.categories.get(*key).and_then(|c| c.score);
            debug!(category = key, score = ?score, "Lighthouse category.");
            (key.to_string(), score)
        })
        .collect();

    info!("PageSpeed scan finished.");
    Ok(QualityReport {
        url: lighthouse.final_url.unwrap_or_else(|| target.url().to_string()),
        scores,
    })
}
