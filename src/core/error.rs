// src/core/error.rs

use thiserror::Error;

/// Failures of a single upstream step. Each variant names the step it came from.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to fetch the PageSpeed data: {0}")]
    PageSpeedRequest(#[source] reqwest::Error),

    #[error("PageSpeed returned no Lighthouse result")]
    MissingLighthouseResult,

    #[error("failed to submit scan to TLS Observatory: {0}")]
    TlsSubmit(#[source] reqwest::Error),

    #[error("failed to get scan_id from TLS Observatory")]
    MissingScanId,

    #[error("failed to fetch scan results from TLS Observatory: {0}")]
    TlsResults(#[source] reqwest::Error),

    #[error("failed to get grade from TLS Observatory")]
    MissingGrade,

    #[error("failed to fetch target site: {0}")]
    TargetFetch(#[source] reqwest::Error),
}

/// Problems with the caller-supplied `url` parameter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("missing URL parameter")]
    Missing,

    #[error("invalid URL parameter")]
    Invalid,
}
