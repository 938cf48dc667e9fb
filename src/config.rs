// src/config.rs

use clap::Parser;
use std::net::SocketAddr;
use url::Url;

pub const DEFAULT_PAGESPEED_API: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const DEFAULT_TLS_OBSERVATORY_API: &str = "https://tls-observatory.services.mozilla.com/api/v1";

/// Name of the environment variable holding the PageSpeed credential.
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_CLOUD_API_KEY";

/// Process configuration, resolved once at startup from flags and environment.
///
/// Handlers receive this through [`crate::app::AppState`] and never consult the
/// process environment themselves.
#[derive(Debug, Clone, Parser)]
#[command(name = "web-check-rs", version, about)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "WEB_CHECK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Google Cloud API key used for PageSpeed Insights.
    #[arg(long, env = GOOGLE_API_KEY_ENV, hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// PageSpeed Insights `runPagespeed` endpoint.
    #[arg(long, env = "WEB_CHECK_PAGESPEED_API", default_value = DEFAULT_PAGESPEED_API)]
    pub pagespeed_api: Url,

    /// Base URL of the Mozilla TLS Observatory API.
    #[arg(long, env = "WEB_CHECK_TLS_OBSERVATORY_API", default_value = DEFAULT_TLS_OBSERVATORY_API)]
    pub tls_observatory_api: Url,

    /// User agent sent on every outbound request.
    #[arg(
        long,
        env = "WEB_CHECK_USER_AGENT",
        default_value = concat!("web-check-rs/", env!("CARGO_PKG_VERSION"))
    )]
    pub user_agent: String,
}

impl Config {
    /// The PageSpeed key, treating an empty value the same as an absent one.
    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
