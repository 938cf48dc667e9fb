// src/core/scanner/tls_scanner.rs

use crate::core::error::ScanError;
use crate::core::models::{ScanId, ScanOutcome, ScanSubmission, TlsGrade};
use crate::core::scanner::endpoint;
use crate::core::scanner::pipeline::{TwoStageScan, run_two_stage};
use crate::core::target::Target;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, error, info};
use url::Url;

/// Certificate grading through the Mozilla TLS Observatory.
///
/// `POST {api}/scan` with `target=<host>` returns a scan id, and
/// `GET {api}/results?id=<scan id>` returns the graded result.
pub struct TlsScanner<'a> {
    client: &'a Client,
    api: &'a Url,
}

impl<'a> TlsScanner<'a> {
    pub fn new(client: &'a Client, api: &'a Url) -> Self {
        Self { client, api }
    }
}

impl TwoStageScan for TlsScanner<'_> {
    type Ticket = ScanId;
    type Output = TlsGrade;

    fn submit(&self, target: &Target) -> impl Future<Output = Result<Option<ScanId>, ScanError>> + Send {
        let request = self
            .client
            .post(endpoint(self.api, "scan"))
            .form(&[("target", target.host())]);

        async move {
            let submission: ScanSubmission = request
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| {
                    error!(error = %e, "TLS Observatory scan submission failed");
                    ScanError::TlsSubmit(e)
                })?
                .json()
                .await
                .map_err(ScanError::TlsSubmit)?;

            let scan_id = submission.scan_id();
            debug!(scan_id = ?scan_id.map(ScanId::get), "TLS Observatory accepted submission.");
            Ok(scan_id)
        }
    }

    fn fetch(&self, ticket: ScanId) -> impl Future<Output = Result<TlsGrade, ScanError>> + Send {
        let request = self
            .client
            .get(endpoint(self.api, "results"))
            .query(&[("id", ticket.get())]);

        async move {
            let outcome: ScanOutcome = request
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| {
                    error!(scan_id = %ticket, error = %e, "TLS Observatory result fetch failed");
                    ScanError::TlsResults(e)
                })?
                .json()
                .await
                .map_err(ScanError::TlsResults)?;

            outcome
                .grade
                .filter(|g| !g.trim().is_empty())
                .map(|grade| TlsGrade { grade })
                .ok_or(ScanError::MissingGrade)
        }
    }

    fn missing_ticket(&self) -> ScanError {
        ScanError::MissingScanId
    }
}

/// Submits the target to the Observatory and returns its grade.
pub async fn run_tls_scan(client: &Client, api: &Url, target: &Target) -> Result<TlsGrade, ScanError> {
    info!(host = target.host(), "Starting TLS Observatory scan.");
    let grade = run_two_stage(&TlsScanner::new(client, api), target).await?;
    info!(grade = %grade.grade, "TLS Observatory scan finished.");
    Ok(grade)
}
