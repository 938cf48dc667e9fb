// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroU64;

// --- PageSpeed Insights ---

/// The subset of a `runPagespeed` response we read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    pub final_url: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, LighthouseCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LighthouseCategory {
    pub score: Option<f64>,
}

/// Envelope returned by `/check-quality`.
///
/// `scores` always holds every requested category; a category Lighthouse did
/// not score is `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QualityReport {
    pub url: String,
    pub scores: BTreeMap<String, Option<f64>>,
}

// --- TLS Observatory ---

/// Body of `POST /scan`. The Observatory answers `0` when it refused the target.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSubmission {
    pub scan_id: Option<u64>,
}

/// Identifier handed out by the Observatory's submit step. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanId(NonZeroU64);

impl ScanId {
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ScanSubmission {
    pub fn scan_id(&self) -> Option<ScanId> {
        self.scan_id.and_then(ScanId::new)
    }
}

/// Body of `GET /results?id=…`; only the grade is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanOutcome {
    pub grade: Option<String>,
}

/// Envelope returned by `/tls`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TlsGrade {
    pub grade: String,
}

// --- Fingerprinting ---

/// Envelope returned by `/tech-stack`. Names are sorted and unique.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TechStack {
    #[serde(rename = "tech-stack")]
    pub tech_stack: Vec<String>,
}

impl From<BTreeSet<&str>> for TechStack {
    fn from(names: BTreeSet<&str>) -> Self {
        Self { tech_stack: names.into_iter().map(str::to_string).collect() }
    }
}

// --- Firewall ---

/// Envelope returned by `/firewall`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FirewallReport {
    #[serde(rename = "hasWaf")]
    pub has_waf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waf: Option<String>,
}

impl FirewallReport {
    pub fn detected(name: &str) -> Self {
        Self { has_waf: true, waf: Some(name.to_string()) }
    }

    pub fn none() -> Self {
        Self { has_waf: false, waf: None }
    }
}
