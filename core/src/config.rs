//! Client configuration.
//!
//! `CF_API_ROOT` names the platform endpoint (e.g. `https://api.example.org`);
//! `CF_REQUEST_TIMEOUT_SECS` optionally overrides the transport timeout.

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const API_ROOT_VAR: &str = "CF_API_ROOT";
pub const REQUEST_TIMEOUT_VAR: &str = "CF_REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_root: Url,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_root: &str) -> Result<Self, ApiError> {
        let api_root = Url::parse(api_root)
            .map_err(|e| ApiError::Config(format!("api root `{api_root}`: {e}")))?;
        if !matches!(api_root.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "api root must be http or https, got `{}`",
                api_root.scheme()
            )));
        }
        Ok(Self {
            api_root,
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cf-core/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let root = lookup(API_ROOT_VAR)
            .ok_or_else(|| ApiError::Config(format!("{API_ROOT_VAR} is not set")))?;
        let mut config = Self::new(&root)?;
        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| ApiError::Config(format!("{REQUEST_TIMEOUT_VAR} `{raw}` is not a number")))?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Absolute URL for a root-relative request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_root.as_str().trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_root_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_ROOT_VAR, "https://api.example.org"),
            (REQUEST_TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_root.as_str(), "https://api.example.org/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_root_is_a_config_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn rejects_non_http_root() {
        assert!(ClientConfig::new("ftp://api.example.org").is_err());
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn url_for_keeps_root_prefix() {
        let config = ClientConfig::new("http://localhost:3000/cf/").unwrap();
        assert_eq!(config.url_for("/v2/info"), "http://localhost:3000/cf/v2/info");
    }
}
