// src/core/target.rs

use crate::core::error::TargetError;
use url::Url;

/// A validated scan target derived from the `url` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
    host: String,
}

impl Target {
    /// Normalizes user input into a target.
    ///
    /// Bare hostnames get an `https://` scheme. Only `http` and `https` URLs
    /// with a host are accepted.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TargetError::Missing);
        }

        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };

        let url = Url::parse(&with_scheme).map_err(|_| TargetError::Invalid)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TargetError::Invalid);
        }
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(TargetError::Invalid)?
            .to_string();

        Ok(Self { url, host })
    }

    /// Like [`Target::parse`], treating an absent parameter as empty.
    pub fn from_param(raw: Option<&str>) -> Result<Self, TargetError> {
        Self::parse(raw.unwrap_or_default())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `scheme://host[:port]`, with path and query dropped.
    pub fn site_root(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}
