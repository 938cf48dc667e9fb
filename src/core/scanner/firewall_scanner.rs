// src/core/scanner/firewall_scanner.rs

use crate::core::models::FirewallReport;
use crate::core::scanner::fetch_site_headers;
use crate::core::target::Target;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::{debug, info, warn};

/// A response-header signature identifying a web application firewall.
struct WafSignature {
    name: &'static str,
    header: &'static str,
    /// Case-insensitive substring of the header value. Empty means presence alone matches.
    needle: &'static str,
}

const fn sig(name: &'static str, header: &'static str, needle: &'static str) -> WafSignature {
    WafSignature { name, header, needle }
}

/// Checked in order; the first match wins.
static SIGNATURES: &[WafSignature] = &[
    sig("Cloudflare", "server", "cloudflare"),
    sig("AWS WAF", "x-powered-by", "aws lambda"),
    sig("Akamai", "server", "akamaighost"),
    sig("Sucuri", "server", "sucuri"),
    sig("Barracuda WAF", "server", "barracudawaf"),
    sig("F5 BIG-IP", "server", "big-ip"),
    sig("Sucuri CloudProxy WAF", "x-sucuri-id", ""),
    sig("Sucuri CloudProxy WAF", "x-sucuri-cache", ""),
    sig("Fortinet FortiWeb WAF", "server", "fortiweb"),
    sig("Imperva SecureSphere WAF", "server", "imperva"),
    sig("Sqreen", "x-protected-by", "sqreen"),
    sig("Reblaze WAF", "x-waf-event-info", ""),
    sig("Citrix NetScaler", "set-cookie", "_citrix_ns_id"),
    sig("WangZhanBao WAF", "x-denied-reason", ""),
    sig("WangZhanBao WAF", "x-wzws-requested-method", ""),
    sig("Webcoment Firewall", "x-webcoment", ""),
    sig("Yundun WAF", "server", "yundun"),
    sig("Yundun WAF", "x-yd-waf-info", ""),
    sig("Yundun WAF", "x-yd-info", ""),
    sig("Safe3 Web Application Firewall", "server", "safe3waf"),
    sig("NAXSI WAF", "server", "naxsi"),
    sig("IBM WebSphere DataPower", "x-datapower-transactionid", ""),
    sig("QRATOR WAF", "server", "qrator"),
    sig("DDoS-Guard WAF", "server", "ddos-guard"),
];

/// Fetches the target's site root and looks for a known WAF in its headers.
///
/// A target that cannot be reached shows no WAF headers, so it reports none.
pub async fn run_firewall_scan(client: &Client, target: &Target) -> FirewallReport {
    info!(host = target.host(), "Starting firewall scan.");
    let report = match fetch_site_headers(client, target).await {
        Ok(headers) => detect_waf(&headers),
        Err(e) => {
            warn!(host = target.host(), error = %e, "Target unreachable, reporting no WAF.");
            FirewallReport::none()
        }
    };
    info!(has_waf = report.has_waf, waf = ?report.waf, "Firewall scan finished.");
    report
}

pub fn detect_waf(headers: &HeaderMap) -> FirewallReport {
    SIGNATURES
        .iter()
        .find(|sig| matches_signature(headers, sig))
        .map(|sig| {
            debug!(waf = sig.name, header = sig.header, "WAF signature matched.");
            FirewallReport::detected(sig.name)
        })
        .unwrap_or_else(FirewallReport::none)
}

fn matches_signature(headers: &HeaderMap, sig: &WafSignature) -> bool {
    headers
        .get_all(sig.header)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|value| sig.needle.is_empty() || value.to_ascii_lowercase().contains(sig.needle))
}
