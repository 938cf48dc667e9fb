// src/core/scanner/pipeline.rs

//! Submit-then-fetch scans.
//!
//! Some upstreams do not answer a scan request directly: the first call hands
//! back a ticket and a second call exchanges that ticket for the result. The
//! ticket is a typed value, so the fetch stage cannot run without one.

use crate::core::error::ScanError;
use crate::core::target::Target;
use std::future::Future;
use tracing::{debug, warn};

/// A scan made of two sequential upstream calls.
pub trait TwoStageScan {
    /// Identifier produced by [`submit`](Self::submit) and consumed by [`fetch`](Self::fetch).
    type Ticket: Send;
    type Output;

    /// Starts the scan. `Ok(None)` means the upstream answered but gave no usable ticket.
    fn submit(&self, target: &Target) -> impl Future<Output = Result<Option<Self::Ticket>, ScanError>> + Send;

    /// Retrieves the result for a ticket obtained from `submit`.
    fn fetch(&self, ticket: Self::Ticket) -> impl Future<Output = Result<Self::Output, ScanError>> + Send;

    /// Error reported when `submit` yields no ticket.
    fn missing_ticket(&self) -> ScanError;
}

/// Runs `submit` then `fetch`. The fetch call is never made without a ticket.
pub async fn run_two_stage<S>(scan: &S, target: &Target) -> Result<S::Output, ScanError>
where
    S: TwoStageScan + Sync,
{
    let Some(ticket) = scan.submit(target).await? else {
        warn!(host = target.host(), "Submit stage returned no ticket.");
        return Err(scan.missing_ticket());
    };
    debug!(host = target.host(), "Submit stage succeeded, fetching result.");
    scan.fetch(ticket).await
}
