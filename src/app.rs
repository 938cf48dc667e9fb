// src/app.rs

use crate::config::Config;

/// State shared by every request handler.
///
/// Nothing in here is mutated after startup: the config is read-only and the
/// HTTP client's connection pool is internally synchronized.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, http })
    }
}
