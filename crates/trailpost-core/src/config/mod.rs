//! Client configuration.
//!
//! Provides the `ClientConfig` struct used by the API client and views to
//! find the forum backend and size pages.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COMMENT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_FEED_BATCH_SIZE: usize = 12;

const ENV_API_URL: &str = "TRAILPOST_API_URL";
const ENV_TIMEOUT_SECS: &str = "TRAILPOST_TIMEOUT_SECS";
const ENV_COMMENT_PAGE_SIZE: &str = "TRAILPOST_COMMENT_PAGE_SIZE";

/// Runtime configuration for talking to the forum backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin; every API path is relative to it.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Comments requested per page on a post.
    pub comment_page_size: u32,
    /// Posts revealed per "load more" step in feeds.
    pub feed_batch_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            comment_page_size: DEFAULT_COMMENT_PAGE_SIZE,
            feed_batch_size: DEFAULT_FEED_BATCH_SIZE,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `TRAILPOST_*` environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from a key lookup on top of `self`.
    ///
    /// Unset keys keep the current value; malformed values are errors.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ApiResult<Self> {
        if let Some(url) = normalize_text_option(lookup(ENV_API_URL)) {
            self.api_base_url = normalize_base_url(&url)?;
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_TIMEOUT_SECS)) {
            let secs = parse_positive(&raw, ENV_TIMEOUT_SECS)?;
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = normalize_text_option(lookup(ENV_COMMENT_PAGE_SIZE)) {
            let size = parse_positive(&raw, ENV_COMMENT_PAGE_SIZE)?;
            self.comment_page_size = u32::try_from(size).map_err(|_| {
                ApiError::InvalidConfiguration(format!("{ENV_COMMENT_PAGE_SIZE} is too large"))
            })?;
        }
        Ok(self)
    }
}

/// Trims the URL, drops trailing slashes and requires an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

fn parse_positive(raw: &str, key: &str) -> ApiResult<u64> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ApiError::InvalidConfiguration(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.comment_page_size, 5);
        assert_eq!(config.feed_batch_size, 12);
    }

    #[test]
    fn overrides_replace_only_set_values() {
        let config = ClientConfig::default()
            .with_overrides(lookup(&[
                ("TRAILPOST_API_URL", " https://forum.example.com/ "),
                ("TRAILPOST_COMMENT_PAGE_SIZE", "10"),
            ]))
            .unwrap();
        assert_eq!(config.api_base_url, "https://forum.example.com");
        assert_eq!(config.comment_page_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_reject_malformed_values() {
        let error = ClientConfig::default()
            .with_overrides(lookup(&[("TRAILPOST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(error.to_string().contains("TRAILPOST_TIMEOUT_SECS"));

        let error = ClientConfig::default()
            .with_overrides(lookup(&[("TRAILPOST_COMMENT_PAGE_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(error, ApiError::InvalidConfiguration(_)));
    }

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("forum.example.com").is_err());
        assert_eq!(
            normalize_base_url("http://localhost:3001/").unwrap(),
            "http://localhost:3001"
        );
    }
}
