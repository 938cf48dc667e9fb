// src/api/handlers.rs

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::TargetParam;
use crate::app::AppState;
use crate::core::models::{FirewallReport, QualityReport, TechStack, TlsGrade};
use crate::core::scanner::{fingerprint_scanner, firewall_scanner, quality_scanner, tls_scanner};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /check-quality?url=example.com
///
/// Lighthouse category scores from PageSpeed Insights. Needs the Google API
/// key from configuration; the URL is validated first.
#[instrument(skip_all, fields(url = %target.url()))]
pub async fn check_quality(
    State(state): State<Arc<AppState>>,
    TargetParam(target): TargetParam,
) -> ApiResult<QualityReport> {
    let api_key = state.config.google_api_key().ok_or(ApiError::MissingApiKey)?;
    let report =
        quality_scanner::run_quality_scan(&state.http, &state.config.pagespeed_api, api_key, &target).await?;
    Ok(Json(report))
}

/// GET /tls?url=example.com
///
/// Submits the host to the TLS Observatory, then fetches the grade by scan id.
#[instrument(skip_all, fields(url = %target.url()))]
pub async fn tls(State(state): State<Arc<AppState>>, TargetParam(target): TargetParam) -> ApiResult<TlsGrade> {
    let grade = tls_scanner::run_tls_scan(&state.http, &state.config.tls_observatory_api, &target).await?;
    Ok(Json(grade))
}

/// GET /tech-stack?url=example.com
#[instrument(skip_all, fields(url = %target.url()))]
pub async fn tech_stack(State(state): State<Arc<AppState>>, TargetParam(target): TargetParam) -> ApiResult<TechStack> {
    let technologies = fingerprint_scanner::run_fingerprint_scan(&state.http, &target).await?;
    Ok(Json(TechStack::from(technologies)))
}

/// GET /firewall?url=example.com
///
/// Always 200 once the URL is valid; an unreachable target reports no WAF.
#[instrument(skip_all, fields(url = %target.url()))]
pub async fn firewall(State(state): State<Arc<AppState>>, TargetParam(target): TargetParam) -> Json<FirewallReport> {
    Json(firewall_scanner::run_firewall_scan(&state.http, &target).await)
}
